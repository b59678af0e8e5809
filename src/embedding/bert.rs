use std::path::Path;

use candle_core::{DType, Device, Result, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};

/// BERT-family sentence encoder with mean pooling.
///
/// Loads `config.json` + `model.safetensors` from a model directory and
/// produces one pooled hidden-state vector per input sequence.
pub struct BertEncoder {
    model: BertModel,
    config: Config,
    device: Device,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {e}")))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };
        let model = BertModel::load(vb, &config)?;

        Ok(Self {
            model,
            config,
            device: device.clone(),
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    /// Runs the forward pass for one unpadded token sequence and returns
    /// the mean of the final hidden states, shape `[hidden_size]`.
    pub fn encode(&self, token_ids: &[u32]) -> Result<Tensor> {
        let input_ids = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        // hidden_states shape: [1, seq_len, hidden_size]
        let hidden_states = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Single unpadded sequence, so masked mean pooling reduces to a
        // plain mean over the sequence dimension.
        hidden_states.mean(1)?.squeeze(0)
    }
}
