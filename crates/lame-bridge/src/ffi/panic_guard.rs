//! Panic guard for FFI boundary safety.
//!
//! Every `extern "C"` function must catch panics to prevent undefined
//! behaviour when unwinding crosses the FFI boundary.

/// Wrap an FFI function body that returns an `i32` status.
///
/// On panic the macro logs and returns `status::INTERNAL`. Leases held by
/// the body are dropped during unwinding, so caller outputs stay untouched.
///
/// # Example
///
/// ```ignore
/// extern "C" fn lmb_do_thing() -> i32 {
///     ffi_guard! {
///         // ... body ...
///         status::OK
///     }
/// }
/// ```
macro_rules! ffi_guard {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        match panic::catch_unwind(AssertUnwindSafe(move || -> i32 { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("panic caught at FFI boundary");
                $crate::error::status::INTERNAL
            }
        }
    }};
}

pub(crate) use ffi_guard;

#[cfg(test)]
mod tests {
    use crate::error::status;

    #[test]
    fn ffi_guard_returns_value_on_success() {
        let result = ffi_guard! { 17 };
        assert_eq!(result, 17);
    }

    #[test]
    fn ffi_guard_passes_early_returns_through() {
        let flag = true;
        let result = ffi_guard! {
            if flag {
                return status::FAILURE;
            }
            status::OK
        };
        assert_eq!(result, status::FAILURE);
    }

    #[test]
    fn ffi_guard_returns_internal_on_panic() {
        let result = ffi_guard! {
            panic!("test panic");
        };
        assert_eq!(result, status::INTERNAL);
    }
}
