//! A turtle pen/fill colour: either a named colour or an RGB triple.

use logo_ir::{Value, Word};

#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(f64, f64, f64),
}

impl Color {
    /// Builds a `Color` from a primitive argument: a bare word names a
    /// colour (`"red`), a 3-element list of numbers is an RGB triple.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Color> {
        match value {
            Value::Word(w) => Some(Color::Named(w.as_str().to_string())),
            Value::List(list) => {
                let items = list.borrow();
                if items.len() != 3 {
                    return None;
                }
                let mut channels = [0.0_f64; 3];
                for (slot, item) in channels.iter_mut().zip(items.iter()) {
                    *slot = item.as_number()?.as_f64();
                }
                Some(Color::Rgb(channels[0], channels[1], channels[2]))
            }
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

#[must_use]
pub fn color_to_word(color: &Color) -> Word {
    match color {
        Color::Named(name) => Word::new(name.as_str()),
        Color::Rgb(r, g, b) => Word::new(format!("[{r} {g} {b}]")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_color_from_bare_word() {
        let v = Value::word("red");
        assert_eq!(Color::from_value(&v), Some(Color::Named("red".to_string())));
    }

    #[test]
    fn rgb_color_from_three_element_list() {
        let v = Value::list(vec![Value::int(255), Value::int(0), Value::int(0)]);
        assert_eq!(Color::from_value(&v), Some(Color::Rgb(255.0, 0.0, 0.0)));
    }

    #[test]
    fn wrong_sized_list_is_not_a_color() {
        let v = Value::list(vec![Value::int(1), Value::int(2)]);
        assert_eq!(Color::from_value(&v), None);
    }
}
