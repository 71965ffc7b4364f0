//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, MillinerError>`. Startup errors (no adapter, a
//! shader that fails to compile or link) are fatal and abort initialization;
//! everything that can happen after the first frame is either recovered in
//! place (invalid configs are clamped, failed uploads keep the previous
//! mesh) or logged and skipped (per-frame surface errors).

use thiserror::Error;

/// The main error type for the hat customizer.
#[derive(Error, Debug)]
pub enum MillinerError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// No usable graphics context could be acquired. Fatal at startup.
    #[error("Graphics context unavailable: {0}")]
    ContextUnavailable(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// A shader stage failed to compile. Fatal at startup.
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile {
        /// Which stage failed ("vertex" or "fragment")
        stage: &'static str,
        /// The validation log reported by the driver
        log: String,
    },

    /// The shader program failed to link into a pipeline. Fatal at startup.
    #[error("Shader program failed to link: {0}")]
    ProgramLink(String),

    /// GPU buffer allocation or copy failed during mesh upload.
    /// The previous render handle stays valid; callers log and keep it.
    #[error("Mesh upload failed: {0}")]
    Upload(String),

    /// A renderer method was called after [`dispose`](crate::Renderer::dispose).
    /// This is a contract violation, not a recoverable runtime condition.
    #[error("Renderer used after dispose")]
    Disposed,

    /// Frame snapshot (offscreen render + readback) failed.
    #[error("Snapshot failed: {0}")]
    Snapshot(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A persisted or externally supplied configuration could not be parsed.
    /// Never fatal: callers fall back to defaults and keep going.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Host / Platform Errors
    // ========================================================================
    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Image encoding error.
    #[error("Image encode error: {0}")]
    ImageEncodeError(String),
}

impl From<image::ImageError> for MillinerError {
    fn from(err: image::ImageError) -> Self {
        MillinerError::ImageEncodeError(err.to_string())
    }
}

/// Alias for `Result<T, MillinerError>`.
pub type Result<T> = std::result::Result<T, MillinerError>;
