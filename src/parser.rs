mod basics;

use basics::parse_number;
use nom::branch::alt;
use nom::character::complete::one_of;
use nom::combinator::{map, map_opt};
use nom::IResult;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MenuOption {
    TitleByIsbn,
    BooksByAuthor,
    AuthorAverage,
    BookAverage,
    TopReviewer,
    InsertUser,
    InsertBook,
    InsertReview,
    TopAuthors,
    TopBooks,
    Help,
    Quit,
}

impl MenuOption {
    /// Numbered options in the order they're listed
    pub const NUMBERED: [MenuOption; 10] = [
        MenuOption::TitleByIsbn,
        MenuOption::BooksByAuthor,
        MenuOption::AuthorAverage,
        MenuOption::BookAverage,
        MenuOption::TopReviewer,
        MenuOption::InsertUser,
        MenuOption::InsertBook,
        MenuOption::InsertReview,
        MenuOption::TopAuthors,
        MenuOption::TopBooks,
    ];

    fn from_number(number: u32) -> Option<Self> {
        let index = (number as usize).checked_sub(1)?;
        Self::NUMBERED.get(index).copied()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TitleByIsbn => "Look up a book by ISBN",
            Self::BooksByAuthor => "Look up books by author",
            Self::AuthorAverage => "Find an author's average book rating",
            Self::BookAverage => "Find a book's average rating",
            Self::TopReviewer => "Find the average rating of the user with the most reviews",
            Self::InsertUser => "Insert a new user",
            Self::InsertBook => "Insert a new book",
            Self::InsertReview => "Insert a new review",
            Self::TopAuthors => "Find the top n authors with the most published books",
            Self::TopBooks => "Find the top n most popular books by number of ratings",
            Self::Help => "Show this menu",
            Self::Quit => "Quit",
        }
    }
}

fn parse_option(input: &str) -> IResult<&str, MenuOption> {
    alt((
        map_opt(parse_number, MenuOption::from_number),
        map(one_of("qQ"), |_| MenuOption::Quit),
        map(one_of("hH?"), |_| MenuOption::Help),
    ))(input)
}

pub fn parse_line(input: &str) -> Option<MenuOption> {
    let input = input.trim();
    let (rest, option) = parse_option(input).ok()?;

    if rest.is_empty() {
        Some(option)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_options() {
        for (i, expected) in MenuOption::NUMBERED.iter().enumerate() {
            let line = (i + 1).to_string();
            assert_eq!(parse_line(&line), Some(*expected));
        }
    }

    #[test]
    fn ten_is_not_one() {
        assert_eq!(parse_line("10"), Some(MenuOption::TopBooks));
        assert_eq!(parse_line("1"), Some(MenuOption::TitleByIsbn));
    }

    #[test]
    fn quit_and_help() {
        assert_eq!(parse_line("q"), Some(MenuOption::Quit));
        assert_eq!(parse_line("Q"), Some(MenuOption::Quit));
        assert_eq!(parse_line("?"), Some(MenuOption::Help));
        assert_eq!(parse_line("h"), Some(MenuOption::Help));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse_line("  7 \n"), Some(MenuOption::InsertBook));
    }

    #[test]
    fn parse_invalid_line() {
        for line in ["", "0", "11", "1x", "qq", "quit", "01", "-3", "4 5"].iter() {
            assert_eq!(parse_line(line), None, "accepted {:?}", line);
        }
    }
}
