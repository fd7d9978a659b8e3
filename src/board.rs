//! GPIO map of the ESP32 (WROOM-32 module)

/// GPIOs wired to the integrated SPI flash, unusable by the application
pub const FLASH_PINS: core::ops::RangeInclusive<u8> = 6..=11;

/// GPIOs with an input buffer only
pub const INPUT_ONLY_PINS: core::ops::RangeInclusive<u8> = 34..=39;

/// Whether `pin` exists on the chip
pub fn exists(pin: u8) -> bool {
    matches!(pin, 0..=19 | 21..=23 | 25..=27 | 32..=39)
}

/// Whether `pin` can be handed to a peripheral as an input
pub fn is_usable(pin: u8) -> bool {
    exists(pin) && !FLASH_PINS.contains(&pin)
}

/// Whether `pin` can drive an output (UART TX)
pub fn is_output_capable(pin: u8) -> bool {
    is_usable(pin) && !INPUT_ONLY_PINS.contains(&pin)
}
