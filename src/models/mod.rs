mod greeting;

pub use greeting::{Greeting, GreetingDraft};
