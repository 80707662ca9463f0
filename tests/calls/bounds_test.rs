/*!
 * Parameter Bound Properties
 */

use process_calls::core::limits::{DEFAULT_MAX_PARAM_LEN, MAX_PID};
use process_calls::validation::{decode_args, encode_args, validate_pid};
use process_calls::{ErrorKind, LengthRule, RawParam};
use proptest::prelude::*;
use serde_json::Value;

const MAX: usize = DEFAULT_MAX_PARAM_LEN;

proptest! {
    #[test]
    fn prop_declared_length_within_bound_is_accepted(text in "[a-z/ ._-]{1,64}") {
        let param = RawParam::from_text(&text);
        prop_assert_eq!(param.require("executable", LengthRule::Positive, MAX).unwrap(), text.as_str());
    }

    #[test]
    fn prop_non_positive_length_is_rejected(len in i32::MIN..=0) {
        let param = RawParam::new(Some(&b"ls"[..]), len);
        let err = param.require("command", LengthRule::Positive, MAX).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        prop_assert_eq!(
            err.to_string(),
            format!("Invalid 'command_len' parameter specified: [{}]", len)
        );
    }

    #[test]
    fn prop_length_above_bound_is_rejected(len in (MAX as i32 + 1)..=i32::MAX) {
        let buffer = vec![b'x'; 16];
        let param = RawParam::new(Some(&buffer[..]), len);
        let err = param.require("output_file", LengthRule::Positive, MAX).unwrap_err();
        prop_assert!(err.to_string().contains("'output_file_len'"));
    }

    #[test]
    fn prop_pid_range(pid in any::<i64>()) {
        let result = validate_pid(pid);
        prop_assert_eq!(result.is_ok(), (1..=MAX_PID).contains(&pid));
    }

    #[test]
    fn prop_argument_vector_order_preserved(args in prop::collection::vec("[a-zA-Z0-9 ._-]{1,12}", 0..8)) {
        let value = Value::from(args.clone());
        let encoded = encode_args("args", &value).unwrap();
        prop_assert_eq!(decode_args("args_list_json", &encoded).unwrap(), args);
    }
}
