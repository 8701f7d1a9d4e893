//! Keyboard surface of the generator.
//!
//! Key events require the surface to be ready and to hold key focus. A
//! typed character resolves to a key plus a shift requirement; typing holds
//! left shift around the key press exactly like a human would.

use crate::build::build_keyboard_event;
use crate::error::GestureError;
use crate::generator::EventGenerator;
use std::time::Duration;
use tactile_core::HostError;
use tactile_core::event::InputEvent;
use tactile_core::keys::KeyboardKey;
use tracing::debug;

impl EventGenerator {
    // MARK: - Base actions

    /// Presses a key down.
    pub fn key_down(&mut self, key: KeyboardKey) -> Result<(), GestureError> {
        self.send_key_event(key, true)
    }

    /// Releases a key.
    pub fn key_up(&mut self, key: KeyboardKey) -> Result<(), GestureError> {
        self.send_key_event(key, false)
    }

    /// Presses the key that produces a character, ignoring modifiers. Use
    /// [`key_type_char`](Self::key_type_char) to apply shift automatically.
    pub fn key_down_char(&mut self, character: char) -> Result<(), GestureError> {
        self.key_down(self.key_for(character)?)
    }

    /// Releases the key that produces a character, ignoring modifiers.
    pub fn key_up_char(&mut self, character: char) -> Result<(), GestureError> {
        self.key_up(self.key_for(character)?)
    }

    // MARK: - Press actions

    /// A full key press: down then up.
    pub fn key_press(&mut self, key: KeyboardKey) -> Result<(), GestureError> {
        self.key_down(key)?;
        self.key_up(key)
    }

    pub fn key_press_char(&mut self, character: char) -> Result<(), GestureError> {
        self.key_press(self.key_for(character)?)
    }

    /// Presses a key repeatedly with an interval between presses.
    pub fn key_press_count(
        &mut self,
        key: KeyboardKey,
        count: u32,
        interval: Option<Duration>,
    ) -> Result<(), GestureError> {
        let interval = interval.unwrap_or(self.settings().key_type_interval);
        for press in 0..count {
            self.key_press(key)?;
            if press + 1 < count {
                self.wait(interval)?;
            }
        }
        Ok(())
    }

    // MARK: - Type actions

    /// Types a character, holding shift when the character requires it.
    pub fn key_type_char(&mut self, character: char) -> Result<(), GestureError> {
        let stroke = KeyboardKey::from_character(character)
            .ok_or(GestureError::UnknownKeyForCharacter { character })?;

        if stroke.shift {
            self.key_down(KeyboardKey::LeftShift)?;
        }

        self.key_press(stroke.key)?;

        if stroke.shift {
            self.key_up(KeyboardKey::LeftShift)?;
        }

        Ok(())
    }

    /// Types a string with the default inter-character interval.
    pub fn key_type(&mut self, text: &str) -> Result<(), GestureError> {
        self.key_type_with_interval(text, self.settings().key_type_interval)
    }

    /// Types a string, waiting `interval` between characters.
    pub fn key_type_with_interval(
        &mut self,
        text: &str,
        interval: Duration,
    ) -> Result<(), GestureError> {
        let count = text.chars().count();
        for (position, character) in text.chars().enumerate() {
            self.key_type_char(character)?;
            if position + 1 < count {
                self.wait(interval)?;
            }
        }
        Ok(())
    }

    // MARK: - Event

    fn key_for(&self, character: char) -> Result<KeyboardKey, GestureError> {
        KeyboardKey::from_character(character)
            .map(|stroke| stroke.key)
            .ok_or(GestureError::UnknownKeyForCharacter { character })
    }

    fn send_key_event(&mut self, key: KeyboardKey, is_down: bool) -> Result<(), GestureError> {
        if !self.host().is_ready_for_interaction() {
            return Err(GestureError::Host(HostError::NotReady));
        }

        if !self.host().is_key_surface() {
            return Err(GestureError::Host(HostError::NotKeySurface));
        }

        let timestamp = self.clock_ns();
        let event = build_keyboard_event(key, is_down, timestamp, self.settings().sender_id);
        debug!(?key, is_down, "keyboard event");
        self.inject_acknowledged(InputEvent::Keyboard(event))?;

        // Key events are processed a frame later than touch events.
        self.wait(self.settings().key_settle_delay)
    }
}
