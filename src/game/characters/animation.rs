// Character animation system

use std::collections::HashMap;

use super::direction::{Direction, DirectionMap};

/// Direction-keyed animation handles for each animated state
///
/// Missing entries are allowed; the character simply skips the animation
/// call for that facing.
#[derive(Debug, Clone)]
pub struct AnimationTables<T> {
    pub idle: DirectionMap<Option<T>>,
    pub walking: DirectionMap<Option<T>>,
    pub attack: DirectionMap<Option<T>>,
    pub ability: DirectionMap<Option<T>>,
}

impl<T> Default for AnimationTables<T> {
    fn default() -> Self {
        Self {
            idle: DirectionMap::from_fn(|_| None),
            walking: DirectionMap::from_fn(|_| None),
            attack: DirectionMap::from_fn(|_| None),
            ability: DirectionMap::from_fn(|_| None),
        }
    }
}

impl<T> AnimationTables<T> {
    /// Build tables for all four states from a naming function
    /// taking the state prefix and the direction
    pub fn from_fn(mut f: impl FnMut(&str, Direction) -> Option<T>) -> Self {
        Self {
            idle: DirectionMap::from_fn(|d| f("idle", d)),
            walking: DirectionMap::from_fn(|d| f("walk", d)),
            attack: DirectionMap::from_fn(|d| f("attack", d)),
            ability: DirectionMap::from_fn(|d| f("ability", d)),
        }
    }
}

/// Name of the clip for a state prefix and direction, e.g. `walk_north`
pub fn directional_clip_name(prefix: &str, direction: Direction) -> String {
    format!("{}_{}", prefix, direction.name())
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle_south", "attack_east")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
        }
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Plays flipbook clips for one character
///
/// Looping is chosen per `play` call rather than per clip, so the same clip
/// can run as a loop or as a one-shot.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Whether the current animation loops
    looping: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player with idle/walk/attack/ability clips for every direction
    pub fn with_directional_clips() -> Self {
        let mut player = Self::new();

        for direction in Direction::ALL {
            player.add_animation(AnimationClip::new(
                &directional_clip_name("idle", direction),
                8,
                10.0,
            ));
            player.add_animation(AnimationClip::new(
                &directional_clip_name("walk", direction),
                8,
                12.0,
            ));
            // Attack: 6 frames at 20 FPS, short swing
            player.add_animation(AnimationClip::new(
                &directional_clip_name("attack", direction),
                6,
                20.0,
            ));
            player.add_animation(AnimationClip::new(
                &directional_clip_name("ability", direction),
                4,
                16.0,
            ));
        }

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Check if a clip with this name exists
    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name
    ///
    /// Replaying the running looped clip keeps its frame; anything else
    /// restarts from frame zero.
    pub fn play(&mut self, name: &str, looping: bool) {
        if self.current_animation == name && self.playing && self.looping && looping {
            return;
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
        self.looping = looping;
    }

    /// Update the animation (called every frame)
    ///
    /// Returns true when a one-shot animation reached its last frame during
    /// this update.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return false;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count.saturating_sub(1);
                    self.playing = false;
                    return true;
                }
            }
        }
        false
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation loops
    pub fn is_looping(&self) -> bool {
        self.looping
    }
}
