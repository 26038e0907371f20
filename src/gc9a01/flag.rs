/// Parameter values for the GC9A01 commands in [`super::cmd::Cmd`]
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Memory Access Control (0x36) bits
    pub const MADCTL_RGB: u8 = 0x00;
    pub const MADCTL_BGR: u8 = 0x08;

    // Pixel Format (0x3A)
    pub const COLMOD_16BIT: u8 = 0x55; // RGB565 on both interfaces
}
