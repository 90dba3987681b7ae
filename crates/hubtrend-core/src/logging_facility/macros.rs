//! Op boundary macros
//!
//! `find_new_trending` and `collect_snapshot` wrap their work in these, so a
//! run emits one `start` event followed by exactly one `end` or `end_error`.
//! Extra `key = value` fields are passed through to `tracing` unchanged;
//! attach `run_id` so the events of one run can be correlated.

/// Shared body of the op macros. Not part of the public surface.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::$event,
            $($($field)*)?
        )
    };
}

/// Emit the `start` event of an op.
///
/// ```
/// # use hubtrend_core::log_op_start;
/// log_op_start!("find_new_trending", run_id = "0190-...", repo_id = "reach-vb/trending-repos");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Emit the `end` event of an op. `duration_ms` is mandatory.
///
/// ```
/// # use hubtrend_core::log_op_end;
/// log_op_end!("collect_snapshot", duration_ms = 12_u64, record_count = 200_usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info, $op, EVENT_END, duration_ms = $duration $(, $($field)*)?
        )
    };
}

/// Emit the `end_error` event of an op, at error level.
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind and stable code are logged as `err.kind` and `err.code`.
///
/// ```
/// # use hubtrend_core::{log_op_error, errors::TrendError};
/// log_op_error!("find_new_trending", TrendError::EmptyHistory, duration_ms = 3_u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
