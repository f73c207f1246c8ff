use mysql_json_buffers::{BufferError, Reader, MAX_VARINT_BYTES};
use proptest::prelude::*;

fn data_and_position() -> impl Strategy<Value = (Vec<u8>, usize)> {
    proptest::collection::vec(any::<u8>(), 0..64).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 0..=len + 4)
    })
}

proptest! {
    #[test]
    fn property_reads_stay_inside_input((data, x) in data_and_position(), n in 0usize..80) {
        let mut reader = match Reader::at(&data, x) {
            Ok(reader) => reader,
            Err(err) => {
                prop_assert!(x > data.len());
                prop_assert_eq!(err, BufferError::EndOfBuffer);
                return Ok(());
            }
        };
        let available = reader.size();
        prop_assert_eq!(x + available, data.len());
        match reader.try_buf(n) {
            Ok(bytes) => {
                prop_assert!(n <= available);
                prop_assert_eq!(bytes, &data[x..x + n]);
                prop_assert_eq!(reader.size(), available - n);
            }
            Err(err) => {
                prop_assert!(n > available);
                prop_assert_eq!(err, BufferError::EndOfBuffer);
                prop_assert_eq!(reader.size(), available);
            }
        }
    }

    #[test]
    fn property_varint_consumes_at_most_five_bytes(data in proptest::collection::vec(any::<u8>(), 0..16)) {
        let mut reader = Reader::new(&data);
        match reader.try_varint() {
            Ok(_) => {
                prop_assert!(reader.x >= 1 && reader.x <= MAX_VARINT_BYTES);
                prop_assert_eq!(data[reader.x - 1] & 0x80, 0);
            }
            Err(_) => prop_assert_eq!(reader.x, 0),
        }
    }
}
