use std::sync::Arc;

use winit::window::Window;

use super::label::TextLabel;
use crate::core::{GpuContext, SurfaceSize};
use crate::font::LoadedFont;

/// egui family name the label font is registered under
pub const LABEL_FAMILY: &str = "label";

/// Distance of the label from the top-left corner, in points
const LABEL_MARGIN: f32 = 8.0;

/// Draws the text label on top of the sprite through egui
pub struct TextOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl TextOverlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer =
            egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Register `font` as the label family, replacing any previous one
    pub fn bind_font(&self, font: &LoadedFont) {
        self.ctx.set_fonts(label_fonts(font));
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Record the label into `encoder`, drawing over whatever `view` holds
    pub fn paint(
        &mut self,
        window: &Window,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        target: SurfaceSize,
        label: &TextLabel,
    ) {
        let (device, queue) = (gpu.device(), gpu.queue());
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            if label.text().is_empty() {
                return;
            }
            let mut text = egui::RichText::new(label.text())
                .size(label.character_size() as f32)
                .color(label.fill_color());
            if label.has_font() {
                text = text.family(egui::FontFamily::Name(LABEL_FAMILY.into()));
            }
            egui::Area::new(egui::Id::new("text-label"))
                .fixed_pos(egui::pos2(LABEL_MARGIN, LABEL_MARGIN))
                .interactable(false)
                .show(ctx, |ui| {
                    ui.add(egui::Label::new(text).extend());
                });
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [target.width, target.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        self.renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Text Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // egui-wgpu wants a 'static pass; it is dropped before the encoder is used again
            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// egui's default fonts plus `font` under [`LABEL_FAMILY`]
///
/// The font data is keyed by the fixed family name so a host font sharing a
/// name with one of egui's own fonts cannot replace it.
fn label_fonts(font: &LoadedFont) -> egui::FontDefinitions {
    let mut data = egui::FontData::from_owned(font.data().to_vec());
    data.index = font.index();

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(LABEL_FAMILY.to_string(), Arc::new(data));
    fonts.families.insert(
        egui::FontFamily::Name(LABEL_FAMILY.into()),
        vec![LABEL_FAMILY.to_string()],
    );
    fonts
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Load egui's bundled `Hack` face from disk as if it were a host font
    fn host_font_named_hack(tag: &str) -> LoadedFont {
        let defaults = egui::FontDefinitions::default();
        let path = std::env::temp_dir().join(format!(
            "pixel-surface-hack-{}-{}.ttf",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, &defaults.font_data["Hack"].font[..]).unwrap();
        let font = LoadedFont::from_file("Hack", &path, 0).unwrap();
        std::fs::remove_file(&path).ok();
        font
    }

    #[test]
    fn test_label_font_keeps_builtin_fonts() {
        let font = host_font_named_hack("builtin");
        let defaults = egui::FontDefinitions::default();
        let fonts = label_fonts(&font);

        assert_eq!(fonts.font_data.len(), defaults.font_data.len() + 1);
        for name in defaults.font_data.keys() {
            assert!(fonts.font_data.contains_key(name), "{} was dropped", name);
        }
        assert_eq!(
            fonts.families[&egui::FontFamily::Monospace],
            defaults.families[&egui::FontFamily::Monospace]
        );
    }

    #[test]
    fn test_label_family_points_at_loaded_font() {
        let font = host_font_named_hack("label");
        let fonts = label_fonts(&font);

        assert_eq!(
            fonts.families[&egui::FontFamily::Name(LABEL_FAMILY.into())],
            vec![LABEL_FAMILY.to_string()]
        );
        let data = &fonts.font_data[LABEL_FAMILY];
        assert_eq!(data.font.len(), font.data().len());
        assert_eq!(data.index, font.index());
    }
}
