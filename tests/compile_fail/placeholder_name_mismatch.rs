//! Test strict placeholder name error.

use named_format::named_formats;

pub struct Routes;

#[named_formats(strict_names)]
impl Routes {
    #[template("{b}/{a}")]
    pub fn swapped(a: u32, b: u32) -> String;
}

fn main() {
    let _ = Routes;
}
