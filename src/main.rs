use anyhow::{Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
    path::Path,
};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use glquad::{config::load_or_create_config, AppConfig, RenderPipeline};

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    pipeline: RenderPipeline,
}

impl App {
    fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

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
            .map_err(|e| anyhow::anyhow!("Failed to pick a GL config: {e}"))?;

        let window = window.context("Window creation failed")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .expect("Failed to create OpenGL context")
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_config
                .display()
                .create_window_surface(&gl_config, &attrs)
                .expect("Failed to create GL surface")
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .expect("Failed to make context current");

        // Load OpenGL functions
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        info!("OpenGL version: {}", gl_version_string());

        if config.window.vsync {
            if let Err(e) = gl_surface
                .set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
            {
                warn!("Failed to enable vsync: {e}");
            }
        }

        let pipeline = RenderPipeline::new(&config.render)?;

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                pipeline,
            },
            event_loop,
        ))
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.gl_surface.resize(&self.gl_context, width, height);
            unsafe {
                gl::Viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
    }

    fn draw_frame(&self) -> Result<()> {
        self.pipeline.draw_frame()?;
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Failed to swap buffers")?;
        Ok(())
    }
}

fn gl_version_string() -> String {
    let version = unsafe { gl::GetString(gl::VERSION) };
    if version.is_null() {
        return "unknown".to_string();
    }
    unsafe { CStr::from_ptr(version as *const _) }
        .to_string_lossy()
        .into_owned()
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    info!("Initializing application...");

    let config = load_or_create_config(Path::new("glquad.toml"))?;
    let (app, event_loop) = App::new(&config)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(e) = app.draw_frame() {
                    error!("Frame failed: {e:#}");
                    elwt.exit();
                }
            }
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
