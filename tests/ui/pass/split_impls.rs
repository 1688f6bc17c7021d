use named_format::named_formats;

pub struct Paths;

#[named_formats]
impl Paths {
    #[template("/a/{x}")]
    pub fn a(x: u8) -> String;
}

#[named_formats(optimize)]
impl Paths {
    #[template("/b/{y}")]
    pub fn b(y: char) -> String;
}

fn main() {
    assert_eq!(Paths::a(1), "/a/1");
    assert_eq!(Paths::b('z'), "/b/z");
}
