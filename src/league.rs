use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum League {
    #[default]
    LaLiga,
    PremierLeague,
    ChampionsLeague,
}

impl League {
    pub const ALL: [League; 3] = [
        League::LaLiga,
        League::PremierLeague,
        League::ChampionsLeague,
    ];

    pub fn key(self) -> &'static str {
        match self {
            League::LaLiga => "espana",
            League::PremierLeague => "england",
            League::ChampionsLeague => "champions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            League::LaLiga => "La Liga",
            League::PremierLeague => "Premier League",
            League::ChampionsLeague => "Champions League",
        }
    }

    /// Folder under the data dir holding the league's footballcsv checkout.
    pub fn repo_folder(self) -> &'static str {
        match self {
            League::LaLiga => "espana",
            League::PremierLeague => "england",
            League::ChampionsLeague => "champions-league",
        }
    }

    pub fn repo_url(self) -> &'static str {
        match self {
            League::LaLiga => "https://github.com/footballcsv/espana.git",
            League::PremierLeague => "https://github.com/footballcsv/england.git",
            League::ChampionsLeague => "https://github.com/footballcsv/europe-champions-league.git",
        }
    }

    fn csv_file(self) -> &'static str {
        match self {
            League::LaLiga => "esp.1.csv",
            League::PremierLeague => "eng.1.csv",
            League::ChampionsLeague => "cl.csv",
        }
    }

    pub fn csv_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.repo_folder()).join(self.csv_file())
    }

    pub fn next(self) -> Self {
        match self {
            League::LaLiga => League::PremierLeague,
            League::PremierLeague => League::ChampionsLeague,
            League::ChampionsLeague => League::LaLiga,
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "espana" | "spain" | "laliga" | "la liga" | "esp" => Ok(League::LaLiga),
            "england" | "premier" | "premier league" | "epl" | "eng" => {
                Ok(League::PremierLeague)
            }
            "champions" | "champions-league" | "champions league" | "ucl" | "cl" => {
                Ok(League::ChampionsLeague)
            }
            other => Err(format!("unknown league {other:?}")),
        }
    }
}
