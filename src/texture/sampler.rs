//! Texture sampler configuration.

/// Texture addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Clamp to edge pixel.
    ClampToEdge,
    /// Repeat the texture.
    #[default]
    Repeat,
}

impl From<AddressMode> for wgpu::AddressMode {
    fn from(mode: AddressMode) -> Self {
        match mode {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Nearest neighbor (pixelated).
    Nearest,
    /// Linear interpolation (smooth).
    #[default]
    Linear,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Sampler configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplerSettings {
    /// Address mode for both texture axes.
    pub address_mode: AddressMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Minification filter.
    pub min_filter: FilterMode,
}

impl SamplerSettings {
    /// Create the wgpu sampler.
    pub fn create(&self, device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Texture Sampler"),
            address_mode_u: self.address_mode.into(),
            address_mode_v: self.address_mode.into(),
            address_mode_w: self.address_mode.into(),
            mag_filter: self.mag_filter.into(),
            min_filter: self.min_filter.into(),
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SamplerSettings::default();
        assert_eq!(settings.address_mode, AddressMode::Repeat);
        assert_eq!(settings.mag_filter, FilterMode::Linear);
    }
}
