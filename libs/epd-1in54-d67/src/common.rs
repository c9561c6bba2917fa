/// Panel width in pixels (GDEH0154D67).
pub const WIDTH: u32 = 200;
/// Panel height in pixels (GDEH0154D67).
pub const HEIGHT: u32 = 200;
pub const BUFFER_SIZE: usize = (WIDTH as usize).div_ceil(8) * HEIGHT as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}
