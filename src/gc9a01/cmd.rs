pub struct Cmd;
impl Cmd {
    // Reset / power
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_OFF: u8 = 0x20;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;

    // Memory window
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;

    // Format
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;

    // Vendor
    pub const INTER_REGISTER_ENABLE_1: u8 = 0xFE;
    pub const INTER_REGISTER_ENABLE_2: u8 = 0xEF;
}

/*
Vendor registers touched only by the init table (no datasheet names):
0x62..0x67 - gate/source timing
0x70       - gamma-ish timing block
0x84..0x8F - analog tuning
0xF0..0xF3 - gamma 1..4
*/
