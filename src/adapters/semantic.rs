//! Realistic-value generators.
//!
//! Each family produces a string drawn from the caller's RNG so that seeded
//! generators stay reproducible. Most families are backed by `fake`.

use crate::domain::schema::Semantic;
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::currency::en::CurrencyCode;
use fake::faker::internet::en::{DomainSuffix, MACAddress, SafeEmail, IPv4};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty", "Elegant", "Modern", "Recycled",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal",
    "Soft", "Fresh", "Frozen", "Bronze", "Silk", "Marble", "Leather",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish",
    "Cheese", "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

/// Generate a value from the given family.
pub fn generate<R: Rng>(semantic: Semantic, rng: &mut R) -> String {
    match semantic {
        Semantic::Email => SafeEmail().fake_with_rng(rng),
        Semantic::Uuid => uuid_v4(rng),
        Semantic::Url => url(rng),
        Semantic::Phone => PhoneNumber().fake_with_rng(rng),
        Semantic::Name => Name().fake_with_rng(rng),
        Semantic::Address => street_address(rng),
        Semantic::Paragraph => Paragraph(3..6).fake_with_rng(rng),
        Semantic::Image => avatar(rng),
        Semantic::Ipv4 => IPv4().fake_with_rng(rng),
        Semantic::Mac => MACAddress().fake_with_rng(rng),
        Semantic::HexColor => hex_color(rng),
        Semantic::Currency => CurrencyCode().fake_with_rng(rng),
        Semantic::CreditCard => CreditCardNumber().fake_with_rng(rng),
        Semantic::JobTitle => JobTitle().fake_with_rng(rng),
        Semantic::Word => word(rng),
        Semantic::Sentence => Sentence(3..10).fake_with_rng(rng),
        Semantic::Company => CompanyName().fake_with_rng(rng),
        Semantic::ProductName => product_name(rng),
        Semantic::Price => price(rng),
    }
}

/// A single lorem word. Used as the fallback for plain string nodes.
pub fn word<R: Rng>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// A random version 4 UUID built from RNG bytes.
pub fn uuid_v4<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    bytes[6] = (bytes[6] & 0x0f) | 0x40; // version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // RFC 4122 variant

    Uuid::from_bytes(bytes).to_string()
}

fn url<R: Rng>(rng: &mut R) -> String {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("https://{}.{}", host.to_lowercase(), suffix)
}

fn street_address<R: Rng>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{} {}", number, street)
}

fn avatar<R: Rng>(rng: &mut R) -> String {
    format!(
        "https://avatars.githubusercontent.com/u/{}",
        rng.gen_range(1..100_000_000u32)
    )
}

fn hex_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0xff_ffffu32))
}

fn pick<R: Rng>(list: &[&'static str], rng: &mut R) -> &'static str {
    list.choose(rng).copied().unwrap_or_default()
}

fn product_name<R: Rng>(rng: &mut R) -> String {
    let adjective = pick(PRODUCT_ADJECTIVES, rng);
    let material = pick(PRODUCT_MATERIALS, rng);
    let noun = pick(PRODUCT_NOUNS, rng);
    format!("{} {} {}", adjective, material, noun)
}

fn price<R: Rng>(rng: &mut R) -> String {
    let cents = rng.gen_range(100..=100_000u32);
    format!("{}.{:02}", cents / 100, cents % 100)
}
