use crate::config::{DemoConfig, Shape, WindowConfig};
use crate::render::scene::Scene;
use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32, time::Instant};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Owns the window, the GL context/surface and the scene, and runs the
/// poll/swap loop. Everything here is orchestration glue around the
/// windowing stack; the shader builder itself only assumes the context this
/// sets up is current.
pub struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    scene: Scene,
    started: Instant,
}

impl App {
    pub fn new(window_config: &WindowConfig, demo: &DemoConfig) -> Result<(Self, EventLoop<()>)> {
        info!("initializing window and GL context...");

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&window_config.title)
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| anyhow!("failed to pick a GL config: {e}"))?;

        let window = window.context("no window was created for the GL config")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("failed to make context current")?;

        // Load OpenGL functions
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        unsafe {
            if demo.shape == Shape::Cube {
                gl::Enable(gl::DEPTH_TEST);
            }
            gl::ClearColor(0.3, 0.0, 0.5, 1.0);
        }

        let scene = Scene::new(demo)?;

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                scene,
                started: Instant::now(),
            },
            event_loop,
        ))
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state == ElementState::Pressed
                        && event.logical_key == Key::Named(NamedKey::Escape)
                    {
                        elwt.exit();
                    }
                }
                WindowEvent::Resized(size) => self.resize(size.width, size.height),
                WindowEvent::RedrawRequested => self.redraw(),
                _ => (),
            },
            Event::AboutToWait => {
                self.window.request_redraw();
            }
            _ => (),
        })?;

        Ok(())
    }

    fn resize(&self, width: u32, height: u32) {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height))
        else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, width.get() as i32, height.get() as i32);
        }
    }

    fn redraw(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        let size = self.window.inner_size();
        let aspect = size.width as f32 / size.height.max(1) as f32;
        self.scene.draw(self.started.elapsed().as_secs_f32(), aspect);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("failed to swap buffers: {e}");
        }
    }
}
