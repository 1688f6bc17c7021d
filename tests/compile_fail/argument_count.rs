//! Test #[template] argument count errors.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template]
    pub fn bare(a: u32) -> String;

    #[template("/a/{a}", "/b/{a}")]
    pub fn doubled(a: u32) -> String;
}

fn main() {
    let _ = Routes;
}
