//! Cumulus demo binary: a drifting billboard cloud with WASD fly controls.

use std::sync::Arc;

use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use cumulus::prelude::*;

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;
const NUM_PARTICLES: usize = 1000;

fn main() -> Result<()> {
    env_logger::init();

    let config = RenderConfig::default();
    log::info!(
        "{} {} starting: {} particles, fog {:?} (density {}, color {:?})",
        cumulus::NAME,
        cumulus::VERSION,
        NUM_PARTICLES,
        config.fog.mode,
        config.fog.density,
        config.fog.color,
    );

    let mut sampler = EntropySampler::new();
    let mut store =
        ParticleStore::generate(NUM_PARTICLES, CloudDistribution::default(), &mut sampler)?;
    let simulator = Simulator::new(SimulationBounds::default());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Cumulus Cloud Demo")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let mut engine = pollster::block_on(Engine::new(
        window.clone(),
        size.width.max(1),
        size.height.max(1),
        config,
        NUM_PARTICLES as u32,
        &mut sampler,
    ))?;

    let mut camera = PerspectiveCamera::new(45.0, engine.aspect_ratio(), 0.1, 100.0);
    let mut controls = FlyControls::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => elwt.exit(),

            WindowEvent::Resized(new_size) => {
                engine.resize(new_size.width, new_size.height);
                camera.set_aspect(engine.aspect_ratio());
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                match code {
                    KeyCode::Escape if pressed => elwt.exit(),
                    KeyCode::KeyW => controls.set_pressed(MoveKey::Forward, pressed),
                    KeyCode::KeyS => controls.set_pressed(MoveKey::Backward, pressed),
                    KeyCode::KeyA => controls.set_pressed(MoveKey::Left, pressed),
                    KeyCode::KeyD => controls.set_pressed(MoveKey::Right, pressed),
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let dt = engine.delta_time();

                controls.update(&mut camera, dt);
                simulator.update(&mut store, &mut sampler, dt);
                sort_back_to_front(store.particles_mut(), camera.position);

                match engine.render(&mut camera, store.particles()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        engine.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory, exiting");
                        elwt.exit();
                    }
                    Err(error) => log::warn!("Surface error: {error:?}"),
                }
            }

            _ => {}
        },

        Event::AboutToWait => window.request_redraw(),

        _ => {}
    })?;

    Ok(())
}
