//! Span definitions per pipeline stage: process, detector, fusion, classify.

/// Span covering one message through the whole pipeline.
#[macro_export]
macro_rules! process_span {
    ($room_id:expr, $author:expr) => {
        tracing::info_span!("concord.process", room_id = %$room_id, author = %$author)
    };
}

/// Span around a single detector invocation.
#[macro_export]
macro_rules! detector_span {
    ($kind:expr) => {
        tracing::debug_span!("concord.detector", kind = %$kind)
    };
}

#[macro_export]
macro_rules! fusion_span {
    ($signal_count:expr) => {
        tracing::debug_span!("concord.fusion", signal_count = $signal_count)
    };
}

#[macro_export]
macro_rules! classify_span {
    ($window_len:expr) => {
        tracing::debug_span!("concord.classify", window_len = $window_len)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PROCESS: &str = "concord.process";
    pub const DETECTOR: &str = "concord.detector";
    pub const FUSION: &str = "concord.fusion";
    pub const CLASSIFY: &str = "concord.classify";
}
