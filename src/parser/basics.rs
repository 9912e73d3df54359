// Copyright (c) 2020 White Leaf
// 
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::character::complete::digit1;
use nom::combinator::{map_res, verify};
use nom::IResult;

/// Plain decimal number without sign or leading zeros
pub(crate) fn parse_number(input: &str) -> IResult<&str, u32> {
    map_res(
        verify(digit1, |s: &str| s == "0" || !s.starts_with('0')),
        |s: &str| s.parse::<u32>(),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        let parsed = parse_number("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_leading_zero() {
        assert!(parse_number("07").is_err());
        assert_eq!(parse_number("0"), Ok(("", 0)));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(parse_number("q").is_err());
        assert!(parse_number("-1").is_err());
        assert!(parse_number("99999999999").is_err());
    }
}
