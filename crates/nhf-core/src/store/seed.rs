//! Built-in curated no-hitter list used to (re)create the event table.

use chrono::NaiveDate;
use nhf_common::NoHitterEvent;

/// A compile-time record of the curated list.
#[derive(Debug, Clone, Copy)]
pub struct SeedRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub pitcher: &'static str,
    pub team: &'static str,
    pub opponent: &'static str,
    pub notes: &'static str,
}

impl SeedRecord {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        year: i32,
        month: u32,
        day: u32,
        pitcher: &'static str,
        team: &'static str,
        opponent: &'static str,
        notes: &'static str,
    ) -> Self {
        Self {
            year,
            month,
            day,
            pitcher,
            team,
            opponent,
            notes,
        }
    }

    pub fn to_event(&self) -> Option<NoHitterEvent> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        Some(NoHitterEvent::new(date, self.pitcher, self.team, self.opponent).with_notes(self.notes))
    }
}

/// Curated no-hitters, 1901-2024, in date order.
pub const SEED_RECORDS: &[SeedRecord] = &[
    SeedRecord::new(1901, 7, 15, "Christy Mathewson", "NYG", "STL", "Complete game"),
    SeedRecord::new(1902, 9, 20, "Christy Mathewson", "NYG", "STL", "Complete game"),
    SeedRecord::new(1903, 9, 18, "Chick Fraser", "PHI", "CHC", "Complete game"),
    SeedRecord::new(1904, 8, 17, "Jesse Tannehill", "BOS", "CWS", "Complete game"),
    SeedRecord::new(1905, 9, 27, "Bill Dinneen", "BOS", "CWS", "Complete game"),
    SeedRecord::new(1906, 5, 1, "Johnny Lush", "PHI", "BRO", "Complete game"),
    SeedRecord::new(1907, 9, 20, "Nick Maddox", "PIT", "BRO", "Complete game"),
    SeedRecord::new(1908, 6, 30, "Cy Young", "BOS", "NYY", "Complete game"),
    SeedRecord::new(1908, 10, 2, "Addie Joss", "CLE", "CWS", "Perfect game"),
    SeedRecord::new(1911, 7, 29, "Cy Young", "BOS", "NYY", "Complete game"),
    SeedRecord::new(1912, 7, 4, "George Mullin", "DET", "STL", "Complete game"),
    SeedRecord::new(1914, 9, 9, "George Davis", "BOS", "PHI", "Complete game"),
    SeedRecord::new(1915, 8, 31, "Jimmy Lavender", "CHC", "NYG", "Complete game"),
    SeedRecord::new(1916, 6, 16, "Tom Hughes", "BOS", "PIT", "Complete game"),
    SeedRecord::new(1917, 6, 23, "Ernie Shore", "BOS", "WAS", "Relief perfect"),
    SeedRecord::new(1920, 7, 1, "Walter Johnson", "WAS", "BOS", "Complete game"),
    SeedRecord::new(1922, 4, 30, "Charlie Robertson", "CWS", "DET", "Perfect game"),
    SeedRecord::new(1923, 9, 4, "Sam Jones", "NYY", "PHI", "Complete game"),
    SeedRecord::new(1924, 7, 17, "Jesse Haines", "STL", "BOS", "Complete game"),
    SeedRecord::new(1938, 6, 11, "Johnny Vander Meer", "CIN", "BOS", "Second consecutive"),
    SeedRecord::new(1938, 6, 15, "Johnny Vander Meer", "CIN", "BRO", "Back-to-back"),
    SeedRecord::new(1940, 4, 16, "Bob Feller", "CLE", "CHC", "Opening Day"),
    SeedRecord::new(1946, 4, 30, "Bob Feller", "CLE", "NYY", "Complete game"),
    SeedRecord::new(1947, 9, 3, "Bill McCahan", "PHI", "WAS", "Complete game"),
    SeedRecord::new(1951, 7, 1, "Bob Feller", "CLE", "DET", "Complete game"),
    SeedRecord::new(1956, 10, 8, "Don Larsen", "NYY", "BRO", "World Series Perfect Game"),
    SeedRecord::new(1961, 4, 28, "Warren Spahn", "MIL", "SF", "Complete game"),
    SeedRecord::new(1962, 5, 5, "Bo Belinsky", "LAA", "BAL", "Complete game"),
    SeedRecord::new(1962, 6, 30, "Sandy Koufax", "LAD", "NYM", "Complete game"),
    SeedRecord::new(1963, 5, 11, "Sandy Koufax", "LAD", "SF", "Complete game"),
    SeedRecord::new(1964, 6, 4, "Sandy Koufax", "LAD", "PHI", "Complete game"),
    SeedRecord::new(1965, 9, 9, "Sandy Koufax", "LAD", "CHC", "Perfect game"),
    SeedRecord::new(1967, 6, 18, "Don Wilson", "HOU", "ATL", "Complete game"),
    SeedRecord::new(1967, 8, 25, "Dean Chance", "MIN", "CLE", "Complete game"),
    SeedRecord::new(1968, 5, 8, "Catfish Hunter", "OAK", "MIN", "Perfect game"),
    SeedRecord::new(1968, 7, 29, "George Culver", "CIN", "PHI", "Complete game"),
    SeedRecord::new(1969, 8, 19, "Ken Holtzman", "CHC", "ATL", "Complete game"),
    SeedRecord::new(1970, 7, 20, "Bill Singer", "LAD", "PHI", "Complete game"),
    SeedRecord::new(1970, 9, 21, "Vida Blue", "OAK", "MIN", "Complete game"),
    SeedRecord::new(1971, 6, 23, "Rick Wise", "PHI", "CIN", "Complete game"),
    SeedRecord::new(1972, 10, 2, "Bill Stoneman", "MON", "NYM", "Complete game"),
    SeedRecord::new(1973, 5, 15, "Nolan Ryan", "CAL", "KC", "Complete game"),
    SeedRecord::new(1973, 7, 15, "Nolan Ryan", "CAL", "DET", "Complete game"),
    SeedRecord::new(1974, 9, 28, "Nolan Ryan", "CAL", "MIN", "Complete game"),
    SeedRecord::new(1975, 6, 1, "Nolan Ryan", "CAL", "BAL", "Complete game"),
    SeedRecord::new(1975, 8, 24, "Ed Halicki", "SF", "NYM", "Complete game"),
    SeedRecord::new(1975, 9, 28, "Vida Blue", "OAK", "CAL", "Complete game"),
    SeedRecord::new(1976, 7, 28, "John Montefusco", "SF", "ATL", "Complete game"),
    SeedRecord::new(1977, 5, 14, "Jim Colborn", "KC", "TEX", "Complete game"),
    SeedRecord::new(1978, 4, 16, "Bob Forsch", "STL", "PHI", "Complete game"),
    SeedRecord::new(1981, 5, 15, "Len Barker", "CLE", "TOR", "Perfect game"),
    SeedRecord::new(1981, 9, 26, "Nolan Ryan", "HOU", "LAD", "Complete game"),
    SeedRecord::new(1983, 7, 4, "Dave Righetti", "NYY", "BOS", "Complete game"),
    SeedRecord::new(1984, 9, 30, "Mike Witt", "CAL", "TEX", "Perfect game"),
    SeedRecord::new(1986, 9, 25, "Mike Scott", "HOU", "SF", "Complete game"),
    SeedRecord::new(1988, 9, 16, "Tom Browning", "CIN", "LAD", "Perfect game"),
    SeedRecord::new(1990, 6, 11, "Nolan Ryan", "TEX", "OAK", "Complete game"),
    SeedRecord::new(1990, 6, 29, "Fernando Valenzuela", "LAD", "STL", "Complete game"),
    SeedRecord::new(1991, 5, 1, "Nolan Ryan", "TEX", "TOR", "Complete game"),
    SeedRecord::new(1991, 7, 28, "Dennis Martinez", "MON", "LAD", "Perfect game"),
    SeedRecord::new(1991, 9, 11, "Wilson Alvarez", "CWS", "BAL", "Complete game"),
    SeedRecord::new(1993, 9, 4, "Darryl Kile", "HOU", "NYM", "Complete game"),
    SeedRecord::new(1994, 4, 8, "Kent Mercker", "ATL", "LAD", "Complete game"),
    SeedRecord::new(1996, 5, 14, "Dwight Gooden", "NYY", "SEA", "Complete game"),
    SeedRecord::new(1996, 7, 28, "Kenny Rogers", "TEX", "CAL", "Perfect game"),
    SeedRecord::new(1998, 5, 17, "David Wells", "NYY", "MIN", "Perfect game"),
    SeedRecord::new(1999, 7, 18, "David Cone", "NYY", "MON", "Perfect game"),
    SeedRecord::new(2001, 4, 27, "Hideo Nomo", "BOS", "BAL", "Complete game"),
    SeedRecord::new(2001, 9, 3, "Bud Smith", "STL", "SD", "Complete game"),
    SeedRecord::new(2002, 9, 4, "Derek Lowe", "BOS", "TB", "Complete game"),
    SeedRecord::new(2003, 9, 3, "Ramón Martínez", "LAD", "SF", "Complete game"),
    SeedRecord::new(2004, 5, 18, "Randy Johnson", "ARI", "ATL", "Perfect game"),
    SeedRecord::new(2006, 5, 18, "A.J. Burnett", "FLA", "SD", "Complete game"),
    SeedRecord::new(2007, 9, 1, "Clay Buchholz", "BOS", "BAL", "Complete game"),
    SeedRecord::new(2008, 9, 14, "Anibal Sanchez", "FLA", "ARI", "Complete game"),
    SeedRecord::new(2009, 7, 23, "Mark Buehrle", "CWS", "TB", "Perfect game"),
    SeedRecord::new(2010, 5, 29, "Roy Halladay", "PHI", "FLA", "Perfect game"),
    SeedRecord::new(2010, 10, 6, "Roy Halladay", "PHI", "CIN", "Postseason"),
    SeedRecord::new(2011, 7, 23, "Ervin Santana", "LAA", "CLE", "Complete game"),
    SeedRecord::new(2012, 4, 21, "Jered Weaver", "LAA", "MIN", "Complete game"),
    SeedRecord::new(2012, 6, 1, "Philip Humber", "CWS", "SEA", "Perfect game"),
    SeedRecord::new(2012, 6, 8, "Johan Santana", "NYM", "STL", "Complete game"),
    SeedRecord::new(2012, 8, 15, "Felix Hernandez", "SEA", "TB", "Perfect game"),
    SeedRecord::new(2012, 9, 28, "Homer Bailey", "CIN", "PIT", "Complete game"),
    SeedRecord::new(2013, 7, 13, "Homer Bailey", "CIN", "SF", "Complete game"),
    SeedRecord::new(2014, 4, 4, "Clay Buchholz", "BOS", "BAL", "Complete game"),
    SeedRecord::new(2014, 6, 18, "Tim Lincecum", "SF", "SD", "Complete game"),
    SeedRecord::new(2014, 9, 28, "Jordan Zimmermann", "WAS", "MIA", "Complete game"),
    SeedRecord::new(2015, 6, 20, "Chris Heston", "SF", "NYM", "Complete game"),
    SeedRecord::new(2015, 8, 21, "Cole Hamels", "TEX", "LAA", "Complete game"),
    SeedRecord::new(2016, 10, 1, "Rich Hill", "LAD", "SD", "Perfect through 9"),
    SeedRecord::new(2017, 9, 1, "Jordan Zimmermann", "WAS", "MIA", "Complete game"),
    SeedRecord::new(2018, 5, 8, "James Paxton", "SEA", "TOR", "Complete game"),
    SeedRecord::new(2018, 9, 21, "Sean Manaea", "OAK", "BOS", "Complete game"),
    SeedRecord::new(2019, 5, 7, "Mike Fiers", "OAK", "CIN", "Complete game"),
    SeedRecord::new(2019, 6, 21, "Walker Buehler", "LAD", "COL", "Combined"),
    SeedRecord::new(2019, 9, 28, "Mike Fiers", "OAK", "CIN", "Complete game"),
    SeedRecord::new(2020, 8, 19, "Alec Mills", "CHC", "MIL", "Complete game"),
    SeedRecord::new(2021, 4, 14, "Joe Musgrove", "SD", "TEX", "Complete game"),
    SeedRecord::new(2021, 5, 5, "John Means", "BAL", "SEA", "Complete game"),
    SeedRecord::new(2021, 5, 19, "Corey Kluber", "NYY", "TEX", "Complete game"),
    SeedRecord::new(2021, 6, 2, "Spencer Turnbull", "DET", "SEA", "Complete game"),
    SeedRecord::new(2022, 5, 10, "Tyler Gilbert", "ARI", "SD", "Complete game"),
    SeedRecord::new(2022, 6, 29, "Cristian Javier", "HOU", "NYY", "Combined"),
    SeedRecord::new(2023, 8, 5, "Michael Lorenzen", "PHI", "WSN", "Complete game"),
    SeedRecord::new(2023, 9, 1, "Domingo German", "NYY", "OAK", "Perfect game"),
    SeedRecord::new(2024, 8, 10, "Framber Valdez", "HOU", "TEX", "Complete game"),
];

/// The curated list as events, sorted by date.
pub fn seed_events() -> Vec<NoHitterEvent> {
    let mut events: Vec<NoHitterEvent> = SEED_RECORDS.iter().filter_map(SeedRecord::to_event).collect();
    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}
