use rand::Rng;
use sdl2::image::LoadTexture;
use std::path::Path;
use std::time::{Duration, Instant};

mod animation;
mod audio;
mod camera;
mod collision;
mod enemy;
mod friends;
mod game;
mod gui;
mod input_system;
mod level;
mod physics;
mod player;
mod render;
mod save;
mod sprite;
mod text;
mod ui;

use animation::AnimationConfig;
use audio::AudioPlayer;
use game::{GameEvent, GameState, GameWorld, GAME_HEIGHT, GAME_WIDTH};
use gui::{GameOverScreen, VictoryScreen};
use input_system::{InputSystem, SystemAction};
use level::LevelConfig;
use render::render_scene;
use save::ProgressManager;
use sprite::{Frame, SpriteSheet};
use ui::Hud;

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Calculate the best window scale based on monitor size
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let max_scale_w = usable_w / GAME_WIDTH as i32;
            let max_scale_h = usable_h / GAME_HEIGHT as i32;

            // Use smaller scale to ensure both dimensions fit
            let scale = max_scale_w.min(max_scale_h);

            scale.clamp(1, 4) as u32
        }
        Err(_) => {
            println!("Warning: Could not detect monitor size, using 2x scale");
            2
        }
    }
}

/// Loads a texture, degrading to `None` with a warning so the game can
/// run on flat-color stand-ins without any assets installed.
fn load_texture_optional<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Option<sdl2::render::Texture<'a>> {
    match texture_creator.load_texture(path) {
        Ok(texture) => Some(texture),
        Err(_) => {
            eprintln!("Warning: missing texture {}, using placeholder", path);
            None
        }
    }
}

/// Builds a fresh session and wires the sprite controllers onto it.
fn build_world<'a>(
    level: LevelConfig,
    rng: &mut impl Rng,
    player_texture: Option<&'a sdl2::render::Texture<'a>>,
    beetle_texture: Option<&'a sdl2::render::Texture<'a>>,
    player_animations: &AnimationConfig,
    beetle_animations: &AnimationConfig,
) -> GameWorld<'a> {
    let mut world = GameWorld::new_session(level, rng);

    if let Some(texture) = player_texture {
        world
            .player
            .set_animation_controller(player_animations.create_controller(texture));
    }
    if let Some(texture) = beetle_texture {
        for beetle in world.beetles.iter_mut() {
            beetle.set_animation_controller(beetle_animations.create_controller(texture));
        }
    }

    world
}

fn main() -> Result<(), String> {
    println!("critter-rescue starting...");
    let debug_mode = std::env::var("CRITTER_DEBUG").is_ok();
    if debug_mode {
        println!("Debug keys enabled: I = die, O/P = score up/down");
    }

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window_scale = calculate_window_scale(&video_subsystem);
    let window = video_subsystem
        .window(
            "Critter Rescue",
            GAME_WIDTH * window_scale,
            GAME_HEIGHT * window_scale,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let player_texture = load_texture_optional(&texture_creator, "assets/sprites/player.png");
    let friends_texture = load_texture_optional(&texture_creator, "assets/sprites/friends.png");
    let beetle_texture = load_texture_optional(&texture_creator, "assets/sprites/beetle.png");

    let player_animations = if Path::new("assets/config/player_animations.json").exists() {
        AnimationConfig::load_from_file("assets/config/player_animations.json")
            .map_err(|e| format!("Failed to load player animations: {}", e))?
    } else {
        AnimationConfig::default_player()
    };
    let beetle_animations = AnimationConfig::default_beetle();

    // One static frame per friend variant, selected by sheet row
    let friends_sheet = friends_texture
        .as_ref()
        .map(|texture| SpriteSheet::new(texture, vec![Frame::new(0, 0, 43, 50, 300)]));

    let level = if Path::new("assets/levels/area01.json").exists() {
        match LevelConfig::load_from_file("assets/levels/area01.json") {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Warning: failed to load area01.json ({}), using built-in level", e);
                LevelConfig::demo()
            }
        }
    } else {
        LevelConfig::demo()
    };
    println!(
        "Loaded level '{}': {} friend spots, cap {}",
        level.name,
        level.friends.len(),
        level.friend_cap
    );

    let audio = AudioPlayer::new("assets/sounds");

    let progress = match ProgressManager::new() {
        Ok(manager) => {
            let data = manager.load();
            if data.beaten {
                println!("Welcome back! Best score so far: {}", data.best_score);
            }
            Some(manager)
        }
        Err(e) => {
            eprintln!("Warning: progress saving disabled ({})", e);
            None
        }
    };

    let mut rng = rand::thread_rng();
    let mut world = build_world(
        level.clone(),
        &mut rng,
        player_texture.as_ref(),
        beetle_texture.as_ref(),
        &player_animations,
        &beetle_animations,
    );

    let mut input_system = InputSystem::new(debug_mode);
    let mut hud = Hud::new();
    let mut game_over_screen = GameOverScreen::new();
    let mut victory_screen = VictoryScreen::new();
    let mut state = GameState::Playing;

    let mut event_pump = sdl_context.event_pump()?;
    let mut last_frame = Instant::now();

    'running: loop {
        let frame_start = Instant::now();

        for action in input_system.poll_events(&mut event_pump) {
            match action {
                SystemAction::Quit => break 'running,
                SystemAction::Confirm => {
                    let screen_ready = match state {
                        GameState::GameOver => game_over_screen.ready(),
                        GameState::Victory => victory_screen.ready(),
                        GameState::Playing => false,
                    };
                    if screen_ready {
                        world = build_world(
                            level.clone(),
                            &mut rng,
                            player_texture.as_ref(),
                            beetle_texture.as_ref(),
                            &player_animations,
                            &beetle_animations,
                        );
                        hud = Hud::new();
                        game_over_screen.reset();
                        victory_screen.reset();
                        state = GameState::Playing;
                    }
                }
                SystemAction::DebugDie => world.player.die(),
                SystemAction::DebugScoreUp => world.score += rng.gen_range(1..=10),
                SystemAction::DebugScoreDown => {
                    world.score = world.score.saturating_sub(rng.gen_range(1..=10))
                }
            }
        }

        let now = Instant::now();
        // Cap the delta so a dragged window doesn't teleport the player
        let dt = (now - last_frame).as_secs_f32().min(0.25);
        last_frame = now;

        if state == GameState::Playing {
            input_system.sample_actions(&event_pump.keyboard_state());

            let events = world.update(&input_system.snapshot, dt);
            for event in &events {
                match event {
                    GameEvent::Sound(cue) => audio.play(*cue),
                    GameEvent::Victory | GameEvent::GameOver => {
                        // Either way the session is over; the beaten flag
                        // comes straight from the objective
                        if let Some(manager) = &progress {
                            let beaten = world.counter.were_rescued();
                            if let Err(e) = manager.record_session(world.score, beaten) {
                                eprintln!("Warning: could not save progress: {}", e);
                            }
                        }
                    }
                    GameEvent::Respawned { .. } => {}
                }
            }

            if let Some(next) = world.take_due_transition(dt) {
                state = next;
                match state {
                    GameState::GameOver => game_over_screen.trigger(),
                    GameState::Victory => victory_screen.trigger(),
                    GameState::Playing => {}
                }
            }

            hud.update(world.score, world.counter.remaining(), world.player.lives);
        }

        render_scene(&mut canvas, &world, friends_sheet.as_ref())?;
        match state {
            GameState::Playing => {
                hud.render(&mut canvas, world.player.health, world.player.config.max_health)?
            }
            GameState::GameOver => game_over_screen.render(&mut canvas, world.score)?,
            GameState::Victory => {
                victory_screen.render(&mut canvas, world.score, world.counter.rescued())?
            }
        }
        canvas.present();

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }

    println!("Thanks for playing!");
    Ok(())
}
