use crate::constants::surface::MSAA_SAMPLES;
use crate::error::{gpu_operation_error, GalaxyError, GalaxyResult, GpuErrorContext};
use crate::input::SurfaceSize;

/// Configuration for GPU initialization
#[derive(Debug, Clone)]
pub struct GpuContextConfig {
    /// Backends the instance may use
    pub backends: wgpu::Backends,
    /// Power preference for adapter selection
    pub power_preference: wgpu::PowerPreference,
    /// Requested MSAA sample count, lowered to 1 if the surface format can't do it
    pub msaa_samples: u32,
}

impl Default for GpuContextConfig {
    fn default() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::HighPerformance,
            msaa_samples: MSAA_SAMPLES,
        }
    }
}

/// Surface, device and queue for one output target
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
}

impl GpuContext {
    /// Create a context for `target` (a canvas on the web, a window on native)
    /// with an initial physical size.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
        config: GpuContextConfig,
    ) -> GalaxyResult<Self> {
        log::info!("[GpuContext] Initializing GPU context");

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .gpu_context("create_surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(GalaxyError::AdapterUnavailable)?;

        log::info!("[GpuContext] Got adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Galaxy Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .gpu_context("request_device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| gpu_operation_error("configure_surface", "surface reports no formats"))?;

        // Alpha-enabled output: let the page show through where no points are drawn
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(config.msaa_samples)
        {
            config.msaa_samples
        } else {
            log::warn!(
                "[GpuContext] {}x MSAA unsupported for {:?}, antialiasing disabled",
                config.msaa_samples,
                format
            );
            1
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        let mut context = Self {
            device,
            queue,
            surface,
            surface_config,
            sample_count,
            msaa_view: None,
        };
        context.msaa_view = context.create_msaa_view();

        log::info!(
            "[GpuContext] Surface configured: {}x{} {:?}, {} sample(s)",
            context.surface_config.width,
            context.surface_config.height,
            format,
            sample_count
        );

        Ok(context)
    }

    /// Resize the surface to `size` physical pixels
    pub fn resize(&mut self, size: SurfaceSize) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if size.width == self.surface_config.width && size.height == self.surface_config.height {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.msaa_view = self.create_msaa_view();
    }

    /// Current physical surface size
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface_config.width, self.surface_config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Multisampled colour target, `None` when MSAA is off
    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa_view.as_ref()
    }

    /// Acquire the next surface texture. A lost or outdated surface is
    /// reconfigured and the frame is reported as unavailable.
    pub fn acquire_frame(&self) -> GalaxyResult<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::debug!("[GpuContext] Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                Err(GalaxyError::SurfaceUnavailable)
            }
            Err(wgpu::SurfaceError::Timeout) => Err(GalaxyError::SurfaceUnavailable),
            Err(e) => Err(gpu_operation_error("get_current_texture", e)),
        }
    }

    fn create_msaa_view(&self) -> Option<wgpu::TextureView> {
        if self.sample_count <= 1 {
            return None;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Galaxy MSAA Target"),
            size: wgpu::Extent3d {
                width: self.surface_config.width,
                height: self.surface_config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.surface_config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}
