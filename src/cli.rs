use clap::Parser;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Esc / q       : Quit
  Left          : Previous image
  Right / Space : Next image
  o             : Open image dialog
  n             : New window
  f             : Fit to window
  z             : Actual size (1:1)
  i             : Toggle interpolation (nearest / bilinear)
  b             : Toggle background (black / white)
  r / R         : Rotate 90 degrees CW / CCW
  x / y         : Flip horizontal / vertical
  Drag          : Pan
  Wheel         : Zoom at cursor
";

#[derive(Parser)]
#[command(name = "pv", about = "A minimal photo viewer", after_help = HELP_KEYS)]
pub struct Cli {
    /// Image files to view. None opens an empty viewer; more than one
    /// launches an independent viewer process per file.
    pub paths: Vec<std::path::PathBuf>,
}
