//! Application main loop
//!
//! Hand-rolled winit + egui-wgpu shell. Each frame pumps the library
//! view's event subscriptions, applies queued store actions, runs the
//! post-update synchronization and then paints the selected screen.

use anyhow::Result;
use app_core::{AppConfig, CommandId, LibraryStore, MenuPort, Signal, SignalBus};
use app_ui::{InputHandler, LibraryView, Renderer, Theme};
use egui_wgpu::ScreenDescriptor;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Build the event loop and run the shell until exit.
pub fn run(
    config: AppConfig,
    store: LibraryStore,
    signals: Arc<SignalBus>,
    port: Arc<dyn MenuPort>,
) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, store, signals, port);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    input_handler: Option<InputHandler>,
    theme: Theme,

    config: AppConfig,
    store: LibraryStore,
    signals: Arc<SignalBus>,
    library: LibraryView,

    /// One-shot scroll offset handed back to the grid after restoration
    restore_scroll: Rc<Cell<Option<f32>>>,
}

impl App {
    fn new(
        config: AppConfig,
        store: LibraryStore,
        signals: Arc<SignalBus>,
        port: Arc<dyn MenuPort>,
    ) -> Self {
        let restore_scroll = Rc::new(Cell::new(None));
        let scroll_sink = Rc::clone(&restore_scroll);

        let library = LibraryView::new(
            store.handle(),
            Arc::clone(&signals),
            port,
            Box::new(move |offset| scroll_sink.set(Some(offset))),
        );

        Self {
            window: None,
            renderer: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,
            input_handler: None,
            theme: Theme::by_name(&config.general.theme),

            config,
            store,
            signals,
            library,

            restore_scroll,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title("Shutterdeck")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        if self.config.general.start_maximized {
            attrs = attrs.with_maximized(true);
        }

        let window = Arc::new(event_loop.create_window(attrs)?);
        let renderer = pollster::block_on(Renderer::new(window.clone()))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&renderer.device, renderer.config.format, None, 1, false);

        let input_handler = InputHandler::new(self.config.keybindings.clone());

        self.theme.apply(&self.egui_ctx);

        // The view is mounted once the keymap exists to bind to
        self.library.mount(&input_handler);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.input_handler = Some(input_handler);

        Ok(())
    }

    fn handle_command(&mut self, event_loop: &ActiveEventLoop, command: app_core::Command) {
        match command.id.as_str() {
            CommandId::APP_QUIT => {
                self.shutdown();
                event_loop.exit();
            }

            // Enter travels as an application-level signal; the library
            // view reacts through its subscription, not a direct call.
            CommandId::LIBRARY_CONFIRM => self.signals.raise(Signal::ConfirmSelection),

            _ => self.library.handle_command(&command, self.store.state()),
        }
    }

    /// Per-frame state work, before painting.
    fn update(&mut self) {
        self.library.pump(self.store.state());

        let changed = self.store.process_pending();
        if changed {
            tracing::trace!("Store state changed");
        }

        // Runs every frame; every step is idempotent
        self.library.after_update(self.store.state());
    }

    fn render(&mut self) {
        let Some(window) = self.window.clone() else { return };
        let Some(egui_state) = &mut self.egui_state else { return };
        let Some(renderer) = &self.renderer else { return };

        let output = match renderer.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.recover_surface();
                }
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = egui_state.take_egui_input(&window);
        let restore = self.restore_scroll.take();

        let library = &mut self.library;
        let store = &self.store;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                status_ui(ui, store.state(), library);
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                library.ui(ui, store.state(), restore);
            });
        });

        if let Some(egui_state) = &mut self.egui_state {
            egui_state.handle_platform_output(&window, full_output.platform_output);
        }

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let Some(renderer) = &self.renderer else { return };
        let Some(egui_renderer) = &mut self.egui_renderer else { return };

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [renderer.size.0, renderer.size.1],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder = renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&renderer.device, &renderer.queue, *id, delta);
        }

        egui_renderer.update_buffers(
            &renderer.device,
            &renderer.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.09,
                            g: 0.09,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // SAFETY: the render pass is dropped before encoder.finish(),
            // so the borrow stays valid; egui-wgpu 0.29 insists on a
            // 'static lifetime it does not actually need here.
            let render_pass_static: &mut wgpu::RenderPass<'static> =
                unsafe { std::mem::transmute(&mut render_pass) };

            egui_renderer.render(render_pass_static, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        renderer.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn shutdown(&mut self) {
        tracing::info!("Shutting down");
        self.library.unmount();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) {
            let response = egui_state.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            // Text fields own the keyboard while focused
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize((size.width, size.height));
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(handler) = &mut self.input_handler {
                    handler.update_modifiers(modifiers.state());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let command = self
                    .input_handler
                    .as_ref()
                    .and_then(|handler| handler.handle_key(&event));
                if let Some(command) = command {
                    self.handle_command(event_loop, command);
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn status_ui(ui: &mut egui::Ui, state: &app_core::LibraryState, library: &LibraryView) {
    ui.horizontal(|ui| {
        ui.label(format!("{} photos", state.photos.len()));

        if let Some(index) = state.current {
            ui.separator();
            ui.label(format!("{} / {}", index + 1, state.photos.len()));
        } else if !library.highlighted().is_empty() {
            ui.separator();
            ui.label(format!("{} highlighted", library.highlighted().len()));
        }

        if library.export_accelerator_active() {
            ui.separator();
            ui.label("Export ready");
        }
    });
}
