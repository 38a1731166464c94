//! Solid-colour sprites, one per body
//!
//! The source image lives only long enough to be uploaded; afterwards the
//! sprite is a GPU texture plus a small uniform describing where to draw it.

use image::{Rgba, RgbaImage};
use wgpu::util::DeviceExt;

use tumble_core::transform::{DrawTransform, Viewport};

/// Per-sprite uniform data
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteUniform {
    /// x, y, width, height in pixels
    rect: [f32; 4],
    /// Viewport size in pixels
    screen: [f32; 2],
    /// Clockwise rotation in radians
    angle: f32,
    padding: f32,
}

impl SpriteUniform {
    pub(crate) fn new(transform: &DrawTransform, viewport: &Viewport) -> Self {
        let rect = transform.rect;
        Self {
            rect: [rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32],
            screen: [viewport.width as f32, viewport.height as f32],
            angle: transform.angle_degrees.to_radians(),
            padding: 0.0,
        }
    }
}

/// Build a solid-colour image of the given pixel size
pub fn solid_image(size: (u32, u32), color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(size.0, size.1, Rgba(color))
}

/// A texture and the bind groups needed to draw it
pub struct Sprite {
    /// Held so the texture outlives its bind group
    _texture: wgpu::Texture,
    texture_bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl Sprite {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &SpriteLayouts,
        label: &str,
        size: (u32, u32),
        color: [u8; 4],
    ) -> Self {
        let image = solid_image(size, color);
        let extent = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width() * 4),
                rows_per_image: Some(image.height()),
            },
            extent,
        );
        drop(image);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&layouts.sampler),
                },
            ],
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[SpriteUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.uniform,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!("Created sprite '{}' {}x{}", label, size.0, size.1);

        Self {
            _texture: texture,
            texture_bind_group,
            uniform_buffer,
            uniform_bind_group,
        }
    }

    /// Upload this frame's placement
    pub(crate) fn update(
        &self,
        queue: &wgpu::Queue,
        transform: &DrawTransform,
        viewport: &Viewport,
    ) {
        let uniform = SpriteUniform::new(transform, viewport);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub(crate) fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, index_count: u32) {
        render_pass.set_bind_group(0, &self.texture_bind_group, &[]);
        render_pass.set_bind_group(1, &self.uniform_bind_group, &[]);
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

/// Layouts and sampler shared by every sprite
pub(crate) struct SpriteLayouts {
    pub texture: wgpu::BindGroupLayout,
    pub uniform: wgpu::BindGroupLayout,
    pub sampler: wgpu::Sampler,
}

impl SpriteLayouts {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let uniform = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            uniform,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_core::transform::ScreenRect;

    #[test]
    fn test_solid_image() {
        let image = solid_image((20, 20), [0x1F, 0x6F, 0x0F, 0xFF]);
        assert_eq!(image.dimensions(), (20, 20));
        assert!(image.pixels().all(|p| p.0 == [0x1F, 0x6F, 0x0F, 0xFF]));
        assert_eq!(image.as_raw().len(), 20 * 20 * 4);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<SpriteUniform>(), 32);
    }

    #[test]
    fn test_uniform_from_transform() {
        let transform = DrawTransform {
            rect: ScreenRect {
                x: 630,
                y: -50,
                w: 20,
                h: 20,
            },
            angle_degrees: -90.0,
        };
        let viewport = Viewport {
            width: 1280,
            height: 720,
            scale: 10.0,
        };
        let uniform = SpriteUniform::new(&transform, &viewport);
        assert_eq!(uniform.rect, [630.0, -50.0, 20.0, 20.0]);
        assert_eq!(uniform.screen, [1280.0, 720.0]);
        assert!((uniform.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
