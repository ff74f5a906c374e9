//! Display languages and their label tables.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

/// Display language. The command line and `DASHBOARD_LANG` accept the same
/// names, ASCII case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Lang {
    #[default]
    #[value(name = "fr", alias = "français", alias = "francais", alias = "french")]
    French,
    #[value(name = "wo", alias = "wolof")]
    Wolof,
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        <Lang as ValueEnum>::from_str(s, true)
            .map_err(|_| format!("unsupported language `{s}` (expected fr or wo)"))
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::French => write!(f, "fr"),
            Lang::Wolof => write!(f, "wo"),
        }
    }
}

/// Every user-facing string the text report needs.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub as_of: &'static str,
    pub in_brief: &'static str,
    pub active: &'static str,
    pub deceased: &'static str,
    pub recovered: &'static str,
    pub recovery_pct: &'static str,
    pub growth_rate: &'static str,
    pub total_positive: &'static str,
    pub total_negative: &'static str,
    pub total_tests: &'static str,
    pub positivity_pct: &'static str,
    pub contamination: &'static str,
    pub imported: &'static str,
    pub contact: &'static str,
    pub community: &'static str,
    pub population: &'static str,
    pub mean_age: &'static str,
    pub years: &'static str,
    pub men: &'static str,
    pub women: &'static str,
    pub mean_hospitalization: &'static str,
    pub days: &'static str,
    pub no_data: &'static str,
}

static FRENCH: Labels = Labels {
    title: "COVID-19 au Sénégal",
    as_of: "Dernière mise à jour",
    in_brief: "En bref",
    active: "Nombre de malades",
    deceased: "Nombre de décès",
    recovered: "Nombre de guérisons",
    recovery_pct: "Pourcentage de guérison",
    growth_rate: "Taux de croissance journalier lissé sur les 2 derniers jours",
    total_positive: "Nombre total de cas positifs",
    total_negative: "Nombre de tests négatifs",
    total_tests: "Nombre de tests réalisés",
    positivity_pct: "Pourcentage de tests positifs",
    contamination: "Contamination",
    imported: "Nombre total de cas importés",
    contact: "Nombre total de cas contact",
    community: "Nombre total de cas communauté",
    population: "Population touchée",
    mean_age: "Âge moyen des patients",
    years: "ans",
    men: "Hommes",
    women: "Femmes",
    mean_hospitalization: "Temps d'hospitalisation moyen",
    days: "jours",
    no_data: "Aucune donnée disponible",
};

static WOLOF: Labels = Labels {
    title: "Xibaar yu aju ci Jangorëy Koronaa ci Senegal",
    as_of: "Yeesal gu muj",
    in_brief: "Ci lu gaaw",
    active: "Limu ñi feebar",
    deceased: "Limu ñi faatu",
    recovered: "Limu ñi wer",
    recovery_pct: "Dayob ñi wer",
    growth_rate: "Dayob yoqute ñi feebar bis bu ay",
    total_positive: "Mboolem ñi ame Koronaa",
    total_negative: "Mboolem ñi ñu saytu te ñu mùcc ci feebar bi",
    total_tests: "Mboolem ñi ñu saytu",
    positivity_pct: "Dayob ñi ame feebar bi ci ñi ñu saytu",
    contamination: "Tassarok Jangorogui",
    imported: "Limu ñu idy jangorogui ci reewmi",
    contact: "Limu ñi jangorogui dalee ci reewmi",
    community: "Limu ñi ame koronaa ci aye mbollo",
    population: "Way-dëkk ñu feebar daleu",
    mean_age: "At ñu eupe ci yi Jangoroji di diap",
    years: "at",
    men: "Goor",
    women: "Jigéen",
    mean_hospitalization: "Faan ñigua xamné aji wop gi ci laye teud lalu opital",
    days: "faan",
    no_data: "Amul xibaar",
};

impl Lang {
    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::French => &FRENCH,
            Lang::Wolof => &WOLOF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lang() {
        assert_eq!("fr".parse::<Lang>(), Ok(Lang::French));
        assert_eq!("Wolof".parse::<Lang>(), Ok(Lang::Wolof));
        assert!("en".parse::<Lang>().is_err());
    }

    #[test]
    fn test_cli_and_env_accept_the_same_names() {
        use clap::Parser;

        #[derive(Parser)]
        struct Args {
            #[arg(long, value_enum, ignore_case = true)]
            lang: Lang,
        }

        let names = ["fr", "FR", "français", "Francais", "french", "wo", "WO", "wolof", "Wolof"];
        for name in names {
            let from_env = name.parse::<Lang>().unwrap();
            let from_cli = Args::try_parse_from(["covid_senegal", "--lang", name])
                .unwrap()
                .lang;
            assert_eq!(from_cli, from_env, "{name}");
        }

        assert!("en".parse::<Lang>().is_err());
        assert!(Args::try_parse_from(["covid_senegal", "--lang", "en"]).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for lang in [Lang::French, Lang::Wolof] {
            assert_eq!(lang.to_string().parse::<Lang>(), Ok(lang));
        }
    }

    #[test]
    fn test_tables_differ() {
        assert_ne!(Lang::French.labels().in_brief, Lang::Wolof.labels().in_brief);
    }
}
