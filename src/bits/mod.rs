/// Two-lane rows for strips between one and two lanes wide
pub mod wide;
/// Single-lane bit queries generic over primitive unsigned integers
pub mod word;

pub use wide::WideRow;
