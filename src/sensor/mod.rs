pub mod apds9960;

pub use apds9960::Apds9960;

use gpio_cdev::{Chip, LineHandle, LineRequestFlags};

const GPIO_CHIP: &str = "/dev/gpiochip0";
const INTERRUPT_LINE: u32 = 4; // BCM GPIO4, board pin 7

/// Claim the sensor's interrupt line as an input.
///
/// Nothing reads this line yet; the hardware has the INT pad wired to
/// GPIO4 and the pin is reserved so nothing else grabs it. The returned
/// handle releases the line when dropped, which covers every exit path.
pub fn claim_interrupt_pin() -> Result<LineHandle, gpio_cdev::Error> {
    let mut chip = Chip::new(GPIO_CHIP)?;
    let line = chip.get_line(INTERRUPT_LINE)?;
    line.request(LineRequestFlags::INPUT, 0, "matrix-light-sensor")
}
