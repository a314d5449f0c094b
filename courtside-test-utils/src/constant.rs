pub const TEST_CURRENCY: &str = "EUR";
pub const TEST_GROSS_CENTS: i64 = 3000;
pub const TEST_PLATFORM_FEE_CENTS: i64 = 300;
