//! SDL2 front end: window, streaming texture, keyboard bindings and frame pacing.
//!
//! Only compiled with the `window` feature. Rendering never touches SDL2;
//! the window just uploads a finished [`Surface`](crate::render::Surface)
//! and turns key presses into [`InputAction`]s.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::config::{AMBIENT_STEP, FOV_STEP, FRAME_TARGET_TIME};
use crate::render::Surface;
use crate::session::{Command, RotationMode};

/// What the user asked for during one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Quit,
    Resize(u32, u32),
    /// A command that does not depend on current session state.
    Command(Command),
    NextShape,
    ToggleStrategy,
    ToggleRasterizer,
    /// Relative FOV change, in FOV units.
    AdjustFov(f64),
    /// Relative ambient change.
    AdjustAmbient(f64),
    Snapshot,
}

/// Key bindings.
///
/// | Key | Action |
/// |-----|--------|
/// | 1 / 2 / 3 / 4 | rotate around X / Y / Z / X and Y |
/// | 0 | stop rotating |
/// | Space | pause |
/// | Tab | next built-in shape |
/// | C | toggle back-face culling |
/// | Z | painter's sort / depth buffer |
/// | R | scanline / edge-function fill |
/// | Up / Down | zoom in / out |
/// | [ / ] | field of view |
/// | , / . | ambient light |
/// | P | PNG snapshot |
/// | Esc | quit |
pub fn action_for_key(key: Keycode) -> Option<InputAction> {
    let action = match key {
        Keycode::Escape => InputAction::Quit,
        Keycode::Num1 => InputAction::Command(Command::SetRotation(RotationMode::X)),
        Keycode::Num2 => InputAction::Command(Command::SetRotation(RotationMode::Y)),
        Keycode::Num3 => InputAction::Command(Command::SetRotation(RotationMode::Z)),
        Keycode::Num4 => InputAction::Command(Command::SetRotation(RotationMode::XY)),
        Keycode::Num0 => InputAction::Command(Command::SetRotation(RotationMode::Stopped)),
        Keycode::Space => InputAction::Command(Command::TogglePause),
        Keycode::C => InputAction::Command(Command::ToggleCulling),
        Keycode::Up => InputAction::Command(Command::ZoomIn),
        Keycode::Down => InputAction::Command(Command::ZoomOut),
        Keycode::Tab => InputAction::NextShape,
        Keycode::Z => InputAction::ToggleStrategy,
        Keycode::R => InputAction::ToggleRasterizer,
        Keycode::LeftBracket => InputAction::AdjustFov(-FOV_STEP),
        Keycode::RightBracket => InputAction::AdjustFov(FOV_STEP),
        Keycode::Comma => InputAction::AdjustAmbient(-AMBIENT_STEP),
        Keycode::Period => InputAction::AdjustAmbient(AMBIENT_STEP),
        Keycode::P => InputAction::Snapshot,
        _ => return None,
    };
    Some(action)
}

/// Paces the main loop to [`FRAME_TARGET_TIME`] using the SDL timer.
pub struct FrameLimiter {
    timer: sdl2::TimerSubsystem,
    last_tick: u64,
}

impl FrameLimiter {
    /// Blocks until a full frame interval has passed since the previous call
    /// and returns the milliseconds actually elapsed.
    pub fn wait(&mut self) -> u64 {
        let pause = remaining_frame_time(self.timer.ticks64() - self.last_tick);
        if pause > 0 {
            self.timer.delay(pause as u32);
        }
        let now = self.timer.ticks64();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }
}

/// Milliseconds left in the current frame after `elapsed` have been spent.
fn remaining_frame_time(elapsed: u64) -> u64 {
    (FRAME_TARGET_TIME as u64).saturating_sub(elapsed)
}

type Creator = sdl2::render::TextureCreator<sdl2::video::WindowContext>;

/// Shows finished surfaces and reports user input.
pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_size: (u32, u32),
    texture_creator: Box<Creator>,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
}

/// Creates an ARGB8888 streaming texture tied to `creator`'s heap slot.
///
/// # Safety
///
/// `creator` must stay boxed and outlive the returned texture.
unsafe fn streaming_texture(
    creator: &Creator,
    width: u32,
    height: u32,
) -> Result<sdl2::render::Texture<'static>, String> {
    let creator: &'static Creator = &*(creator as *const Creator);
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let timer = sdl.timer()?;
        let canvas = sdl
            .video()?
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        // SAFETY: the creator is boxed and owned by the returned Window, which
        // drops `texture` first.
        let texture = unsafe { streaming_texture(&texture_creator, width, height)? };

        Ok(Self {
            canvas,
            texture,
            texture_size: (width, height),
            texture_creator,
            event_pump: sdl.event_pump()?,
            timer,
        })
    }

    /// A pacer that starts counting from now.
    pub fn frame_limiter(&self) -> FrameLimiter {
        FrameLimiter {
            timer: self.timer.clone(),
            last_tick: self.timer.ticks64(),
        }
    }

    /// Drains the SDL event queue.
    pub fn poll_events(&mut self) -> Vec<InputAction> {
        let mut actions = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(InputAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => actions.extend(action_for_key(key)),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => actions.push(InputAction::Resize(w.max(1) as u32, h.max(1) as u32)),
                _ => {}
            }
        }
        actions
    }

    /// Uploads `surface` and shows it, reallocating the texture when the
    /// surface size changed since the last frame.
    pub fn present(&mut self, surface: &Surface) -> Result<(), String> {
        let size = (surface.width(), surface.height());
        if size != self.texture_size {
            // SAFETY: see `new`.
            self.texture = unsafe { streaming_texture(&self.texture_creator, size.0, size.1)? };
            self.texture_size = size;
        }
        let pitch = surface.width() as usize * 4;
        self.texture
            .update(None, &surface.to_argb_bytes(), pitch)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, size.0, size.1)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_select_rotation() {
        assert_eq!(
            action_for_key(Keycode::Num4),
            Some(InputAction::Command(Command::SetRotation(RotationMode::XY)))
        );
        assert_eq!(
            action_for_key(Keycode::Num0),
            Some(InputAction::Command(Command::SetRotation(RotationMode::Stopped)))
        );
    }

    #[test]
    fn frame_wait_covers_the_rest_of_the_interval() {
        let target = FRAME_TARGET_TIME as u64;
        assert_eq!(remaining_frame_time(0), target);
        assert_eq!(remaining_frame_time(target - 4), 4);
        assert_eq!(remaining_frame_time(target), 0);
        assert_eq!(remaining_frame_time(target * 3), 0);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for_key(Keycode::F12), None);
        assert_eq!(action_for_key(Keycode::P), Some(InputAction::Snapshot));
    }
}
