use candle_core::Device;

use super::error::EmbeddingError;

/// Selects the compute device based on enabled features (falls back to CPU).
///
/// A GPU feature that is compiled in but unusable at runtime is not an
/// error; the embedder degrades to CPU with a warning.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("Using Metal GPU acceleration");
            return Ok(device);
        }
        Err(e) => tracing::warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("Using CUDA GPU acceleration");
            return Ok(device);
        }
        Err(e) => tracing::warn!(error = %e, "CUDA device unavailable"),
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        tracing::warn!("Falling back to CPU device");
    } else {
        tracing::debug!("No GPU features enabled, using CPU");
    }

    Ok(Device::Cpu)
}
