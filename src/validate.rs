use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PHONE: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
