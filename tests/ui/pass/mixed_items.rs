use named_format::named_formats;

pub struct Links {
    base: &'static str,
}

#[named_formats(optimize)]
impl Links {
    pub const VERSION: u8 = 3;

    #[template("/v{version}/{path}")]
    fn versioned(version: u8, path: &str) -> String;

    pub fn new(base: &'static str) -> Self {
        Links { base }
    }

    pub fn full(&self, path: &str) -> String {
        format!("{}{}", self.base, Self::versioned(Self::VERSION, path))
    }
}

fn main() {
    let links = Links::new("https://example.org");
    assert_eq!(links.full("docs"), "https://example.org/v3/docs");
}
