macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(UnitagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(UnitagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(UnitagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::UnitagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($($value:tt)+)) => {
		return Err(crate::error::UnitagError::new(
			crate::error::ErrorKind::$variant($($value)+),
		))
	};
}

// Shorthand for FileDecodingError::new(FileKind::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($file_kind:ident, $reason:literal) => {
		Into::<crate::error::UnitagError>::into(crate::error::FileDecodingError::new(
			crate::kind::FileKind::$file_kind,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::UnitagError>::into(crate::error::FileDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($file_kind:ident,)? $reason:literal) => {
		return Err(decode_err!($($file_kind,)? $reason))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: Fields are optional, a missing `STRICT` or `BESTATTEMPT` arm falls
// 		 through to `DEFAULT`. If `DEFAULT` is missing, it falls through to
// 		 an empty block.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {decode_err, err, parse_mode_choice, try_vec};
