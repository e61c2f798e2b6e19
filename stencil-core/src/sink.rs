/// Append-only destination of the rendered SQL.
///
/// The engine only ever appends, it never reads back what it wrote. `String` and `Vec<u8>` are
/// the usual sinks.
pub trait Sink {
    /// Append a string slice.
    fn push_str(&mut self, value: &str);

    /// Append a single character.
    fn push(&mut self, value: char) {
        let mut buffer = [0u8; 4];
        self.push_str(value.encode_utf8(&mut buffer));
    }
}

impl Sink for String {
    fn push_str(&mut self, value: &str) {
        String::push_str(self, value);
    }

    fn push(&mut self, value: char) {
        String::push(self, value);
    }
}

impl Sink for Vec<u8> {
    fn push_str(&mut self, value: &str) {
        self.extend_from_slice(value.as_bytes());
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn push_str(&mut self, value: &str) {
        (**self).push_str(value);
    }

    fn push(&mut self, value: char) {
        (**self).push(value);
    }
}
