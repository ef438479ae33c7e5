use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Color {
    Red,
    Blue,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Blue => "blue",
        })
    }
}

impl Discriminator for Color {
    const KIND: &'static str = "color";
    const ALL: &'static [Self] = &[Self::Red, Self::Blue];
}

trait Paint: Send + Sync {
    fn color(&self) -> Color;
}

struct Brush(Color);

impl Paint for Brush {
    fn color(&self) -> Color {
        self.0
    }
}

fn table(colors: &[Color]) -> StrategyTable<Color, dyn Paint> {
    colors
        .iter()
        .map(|c| (*c, Arc::new(Brush(*c)) as Arc<dyn Paint>))
        .collect()
}

#[test]
fn select_returns_the_registered_strategy() {
    let table = table(Color::ALL);
    for color in Color::ALL {
        assert_eq!(table.select(*color).expect("strategy").color(), *color);
    }
    assert!(table.verify().is_ok());
}

#[test]
fn missing_mapping_is_reported_by_value() {
    let table = table(&[Color::Red]);
    let err = table.select(Color::Blue).err().expect("missing");
    assert_eq!(err.to_string(), "unsupported color: blue");
    assert_eq!(table.verify(), Err(KitError::unsupported("color", "blue")));
    assert_eq!(table.registered(), vec![Color::Red]);
}

#[test]
fn parse_matches_wire_names_only() {
    assert_eq!(Color::parse("blue"), Ok(Color::Blue));
    assert_eq!(
        Color::parse("Blue"),
        Err(KitError::unsupported("color", "Blue"))
    );
}
