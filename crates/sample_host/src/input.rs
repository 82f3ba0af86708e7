//! Window message payload decoding, kept free of Win32 types so it can be
//! tested anywhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size2D {
    pub width: u32,
    pub height: u32,
}

impl Size2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Client size carried by `WM_SIZE`: width in the low word, height in the
    /// high word.
    pub fn from_lparam(lparam: isize) -> Self {
        Self {
            width: (lparam as usize & 0xFFFF) as u32,
            height: ((lparam as usize >> 16) & 0xFFFF) as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position2D {
    pub x: i32,
    pub y: i32,
}

impl Position2D {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed coordinates packed into an `LPARAM`, as with
    /// `GET_X_LPARAM`/`GET_Y_LPARAM`. Negative values occur on multi-monitor
    /// setups.
    pub fn from_lparam(lparam: isize) -> Self {
        Self {
            x: (lparam as usize & 0xFFFF) as u16 as i16 as i32,
            y: ((lparam as usize >> 16) & 0xFFFF) as u16 as i16 as i32,
        }
    }
}

/// `GET_WHEEL_DELTA_WPARAM`: signed high word, multiples of 120 per notch.
pub fn wheel_delta_from_wparam(wparam: usize) -> i32 {
    ((wparam >> 16) & 0xFFFF) as u16 as i16 as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Left,
    Up,
    Right,
    Down,
    Digit(u8),
    Letter(char),
    Other(u16),
}

impl KeyCode {
    pub fn from_virtual_key(vk: u16) -> Self {
        match vk {
            0x1B => KeyCode::Escape,
            0x0D => KeyCode::Enter,
            0x20 => KeyCode::Space,
            0x25 => KeyCode::Left,
            0x26 => KeyCode::Up,
            0x27 => KeyCode::Right,
            0x28 => KeyCode::Down,
            0x30..=0x39 => KeyCode::Digit((vk - 0x30) as u8),
            0x41..=0x5A => KeyCode::Letter(vk as u8 as char),
            other => KeyCode::Other(other),
        }
    }
}
