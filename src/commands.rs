use winit::keyboard::NamedKey;

// ---------------------------------------------------------------------------
// UI actions and the key -> command dispatch table. Every action, including
// the ones a context menu would usually hold, is bound to a key.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Bilinear,
}

impl Interpolation {
    pub fn toggled(self) -> Self {
        match self {
            Interpolation::Nearest => Interpolation::Bilinear,
            Interpolation::Bilinear => Interpolation::Nearest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Black,
    White,
}

impl Background {
    pub fn toggled(self) -> Self {
        match self {
            Background::Black => Background::White,
            Background::White => Background::Black,
        }
    }

    /// Framebuffer pixel in softbuffer 0x00RRGGBB format.
    pub fn pixel(self) -> u32 {
        match self {
            Background::Black => 0x000000,
            Background::White => 0xFFFFFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenImage,
    SetInterpolation(Interpolation),
    SetBackground(Background),
    ResetFit,
    ResetActualSize,
    NewWindow,
    NextImage,
    PrevImage,
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
    Quit,
}

/// Character bindings. The toggle keys need the current mode to produce the
/// value being switched to.
pub fn command_for_char(
    c: char,
    interpolation: Interpolation,
    background: Background,
) -> Option<Command> {
    match c {
        'o' => Some(Command::OpenImage),
        'n' => Some(Command::NewWindow),
        'f' => Some(Command::ResetFit),
        'z' => Some(Command::ResetActualSize),
        'i' => Some(Command::SetInterpolation(interpolation.toggled())),
        'b' => Some(Command::SetBackground(background.toggled())),
        'r' => Some(Command::RotateCw),
        'R' => Some(Command::RotateCcw),
        'x' => Some(Command::FlipHorizontal),
        'y' => Some(Command::FlipVertical),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

/// Named-key bindings.
pub fn command_for_named(key: NamedKey) -> Option<Command> {
    match key {
        NamedKey::ArrowRight | NamedKey::Space => Some(Command::NextImage),
        NamedKey::ArrowLeft => Some(Command::PrevImage),
        NamedKey::Escape => Some(Command::Quit),
        _ => None,
    }
}
