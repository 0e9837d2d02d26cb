use chrono::{DateTime, TimeZone, Utc};

use hedgepro::domain::{AmericanOdds, Game, Quote};

pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 17, 0, 0).unwrap()
}

pub fn quote(book: &str, outcome: &str, odds: i64) -> Quote {
    Quote::new(book, outcome, AmericanOdds::new(odds))
}

/// A game between `home` and `away` with `(book, outcome, odds)` quotes.
pub fn make_game(home: &str, away: &str, quotes: &[(&str, &str, i64)]) -> Game {
    Game::new(home, away, kickoff()).with_quotes(
        quotes
            .iter()
            .map(|(book, outcome, odds)| quote(book, outcome, *odds)),
    )
}

/// Chiefs vs Bills priced at three books.
pub fn chiefs_bills() -> Game {
    make_game(
        "Chiefs",
        "Bills",
        &[
            ("fanduel", "Chiefs", -140),
            ("fanduel", "Bills", 120),
            ("draftkings", "Chiefs", -130),
            ("draftkings", "Bills", 110),
            ("caesars", "Chiefs", -150),
            ("caesars", "Bills", 125),
        ],
    )
}

/// Eagles vs Cowboys with a long underdog at the promo book.
pub fn eagles_cowboys() -> Game {
    make_game(
        "Eagles",
        "Cowboys",
        &[
            ("fanduel", "Eagles", -300),
            ("fanduel", "Cowboys", 250),
            ("draftkings", "Eagles", -280),
            ("draftkings", "Cowboys", 230),
        ],
    )
}
