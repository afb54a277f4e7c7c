use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputEvent, InputManager, InputTarget};
use game::arena::Arena;

/// Local players sharing the keyboard
const MAX_PLAYERS: usize = 2;

/// Send bound actions to their fighter; the pause key toggles the game loop
fn dispatch(events: Vec<InputEvent>, arena: &mut Arena, game_loop: &mut GameLoop) {
    for event in events {
        match event.target {
            InputTarget::Global if event.action == Action::Pause && event.pressed => {
                game_loop.toggle_pause();
            }
            InputTarget::Global => {}
            InputTarget::Player(_) => arena.handle_input(event, game_loop.now()),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Pixel Arena...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Pixel Arena")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::new(MAX_PLAYERS);
    let mut game_loop = GameLoop::new();
    let mut arena = Arena::default();
    arena.spawn_character("Player 1", Some(0), -2.0, 0.0)?;
    arena.spawn_character("Training Dummy", None, 2.0, 0.0)?;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                let events = input.process_keyboard_event(&event);
                arena.sync_held_keys(input.held_keys());
                dispatch(events, &mut arena, &mut game_loop);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                let events = input.process_mouse_event(state, button);
                dispatch(events, &mut arena, &mut game_loop);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                input.reset_all();
                arena.release_all_input();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {}
            Event::AboutToWait => {
                for _ in 0..game_loop.begin_frame() {
                    if let Err(e) = arena.tick(game_loop.now(), game_loop.fixed_timestep()) {
                        error!("Arena update failed: {}", e);
                    }
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
