use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::types::{MatchRecord, NO_CHAMPIONSHIP, NO_TEAM_A, NO_TEAM_B, NO_TIME, NOT_PLAYED};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
}

static SEL_CHAMPIONSHIP: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.matchCard").expect("invalid selector: championship")
});

static SEL_CHAMPIONSHIP_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("invalid selector: championship name"));

static SEL_MATCH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.liItem").expect("invalid selector: match"));

static SEL_HOME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li.ScoreCell__Item--home").expect("invalid selector: home team")
});

static SEL_AWAY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li.ScoreCell__Item--away").expect("invalid selector: away team")
});

static SEL_TEAM_NAME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.ScoreCell__TeamName").expect("invalid selector: team name")
});

static SEL_RESULT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.MResult").expect("invalid selector: result"));

static SEL_SCORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.score").expect("invalid selector: score"));

static SEL_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.time").expect("invalid selector: time"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first match of `sel` under `parent`, or `default` when there is none.
fn text_or(parent: ElementRef, sel: &Selector, default: &str, field: &str) -> String {
    match parent.select(sel).next() {
        Some(elem) => elem_text(elem),
        None => {
            log::debug!("No {} found, using '{}'", field, default);
            default.to_string()
        }
    }
}

/// Team name inside the home/away cell.
///
/// A missing cell falls back to `default`; a cell without a name element is
/// a malformed match.
fn team_name(
    entry: ElementRef,
    side: &Selector,
    default: &str,
    field: &str,
) -> Result<String, ParseError> {
    let Some(cell) = entry.select(side).next() else {
        log::debug!("No {} found, using '{}'", field, default);
        return Ok(default.to_string());
    };
    cell.select(&SEL_TEAM_NAME)
        .next()
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingField(format!("{} name", field)))
}

fn parse_score(result: Option<ElementRef>) -> String {
    let scores: Vec<String> = result
        .map(|r| r.select(&SEL_SCORE).map(elem_text).collect())
        .unwrap_or_default();

    if scores.is_empty() {
        NOT_PLAYED.to_string()
    } else {
        scores.join(" - ")
    }
}

fn parse_time(result: Option<ElementRef>) -> String {
    result
        .and_then(|r| r.select(&SEL_TIME).next())
        .map(elem_text)
        .unwrap_or_else(|| NO_TIME.to_string())
}

fn parse_match(
    entry: ElementRef,
    championship: &str,
    match_date: &str,
) -> Result<MatchRecord, ParseError> {
    let team_a = team_name(entry, &SEL_HOME, NO_TEAM_A, "home team")?;
    let team_b = team_name(entry, &SEL_AWAY, NO_TEAM_B, "away team")?;

    let result = entry.select(&SEL_RESULT).next();

    Ok(MatchRecord {
        match_date: match_date.to_string(),
        championship: championship.to_string(),
        team_a,
        team_b,
        score: parse_score(result),
        time: parse_time(result),
    })
}

fn parse_championship(section: ElementRef, match_date: &str) -> Vec<MatchRecord> {
    let name = text_or(section, &SEL_CHAMPIONSHIP_NAME, NO_CHAMPIONSHIP, "championship name");

    let entries: Vec<ElementRef> = section.select(&SEL_MATCH).collect();
    if entries.is_empty() {
        log::info!("No matches found in championship: {}", name);
    }

    entries
        .into_iter()
        .filter_map(|entry| match parse_match(entry, &name, match_date) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Could not extract match data in {}: {}", name, e);
                None
            }
        })
        .collect()
}

/// Extracts every match on a match center page, in page order.
pub fn parse_matches(html: &str, match_date: &str) -> Vec<MatchRecord> {
    let document = Html::parse_document(html);

    document
        .select(&SEL_CHAMPIONSHIP)
        .flat_map(|section| parse_championship(section, match_date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATE: &str = "01/15/2025";

    fn page(body: &str) -> String {
        format!("<html><body><div id=\"matchesList\">{}</div></body></html>", body)
    }

    #[test]
    fn test_parse_matches_from_fixture() {
        let html = fs::read_to_string("fixtures/match_center.html")
            .expect("Failed to read fixture");

        let matches = parse_matches(&html, DATE);

        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|m| m.match_date == DATE));

        let first = &matches[0];
        assert_eq!(first.championship, "الدوري المصري الممتاز");
        assert_eq!(first.team_a, "الأهلي");
        assert_eq!(first.team_b, "الزمالك");
        assert_eq!(first.score, "2 - 1");
        assert_eq!(first.time, "19:00");

        let pending = &matches[1];
        assert_eq!(pending.score, NOT_PLAYED);
        assert_eq!(pending.time, "21:30");

        let championships: Vec<&str> = matches.iter().map(|m| m.championship.as_str()).collect();
        assert_eq!(
            championships,
            vec![
                "الدوري المصري الممتاز",
                "الدوري المصري الممتاز",
                "دوري أبطال أفريقيا",
                "دوري أبطال أفريقيا",
                NO_CHAMPIONSHIP,
            ]
        );
    }

    #[test]
    fn test_no_championships_yields_nothing() {
        let html = page("<p>لا توجد مباريات</p>");
        assert!(parse_matches(&html, DATE).is_empty());
        assert!(parse_matches("", DATE).is_empty());
    }

    #[test]
    fn test_missing_score_and_time_use_placeholders() {
        let html = page(
            r#"
            <div class="matchCard">
                <h2> Premier League </h2>
                <div class="liItem">
                    <li class="ScoreCell__Item--home"><div class="ScoreCell__TeamName"> Arsenal </div></li>
                    <li class="ScoreCell__Item--away"><div class="ScoreCell__TeamName">Chelsea</div></li>
                </div>
            </div>
            "#,
        );

        let matches = parse_matches(&html, DATE);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].championship, "Premier League");
        assert_eq!(matches[0].team_a, "Arsenal");
        assert_eq!(matches[0].team_b, "Chelsea");
        assert_eq!(matches[0].score, NOT_PLAYED);
        assert_eq!(matches[0].time, NO_TIME);
    }

    #[test]
    fn test_result_without_score_spans() {
        let html = page(
            r#"
            <div class="matchCard">
                <h2>Serie A</h2>
                <div class="liItem">
                    <div class="MResult"><span class="time">22:00</span></div>
                </div>
            </div>
            "#,
        );

        let matches = parse_matches(&html, DATE);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].team_a, NO_TEAM_A);
        assert_eq!(matches[0].team_b, NO_TEAM_B);
        assert_eq!(matches[0].score, NOT_PLAYED);
        assert_eq!(matches[0].time, "22:00");
    }

    #[test]
    fn test_malformed_match_is_skipped() {
        let html = page(
            r#"
            <div class="matchCard">
                <h2>La Liga</h2>
                <div class="liItem">
                    <li class="ScoreCell__Item--home"><span>Barcelona</span></li>
                    <li class="ScoreCell__Item--away"><div class="ScoreCell__TeamName">Girona</div></li>
                </div>
                <div class="liItem">
                    <li class="ScoreCell__Item--home"><div class="ScoreCell__TeamName">Sevilla</div></li>
                    <li class="ScoreCell__Item--away"><div class="ScoreCell__TeamName">Betis</div></li>
                    <div class="MResult">
                        <span class="score">1</span><span class="score">1</span>
                        <span class="time">18:00</span>
                    </div>
                </div>
            </div>
            "#,
        );

        let matches = parse_matches(&html, DATE);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].team_a, "Sevilla");
        assert_eq!(matches[0].score, "1 - 1");
    }

    #[test]
    fn test_championship_without_matches() {
        let html = page(
            r#"
            <div class="matchCard"><h2>Empty Cup</h2></div>
            <div class="matchCard">
                <div class="liItem">
                    <li class="ScoreCell__Item--home"><div class="ScoreCell__TeamName">A</div></li>
                    <li class="ScoreCell__Item--away"><div class="ScoreCell__TeamName">B</div></li>
                </div>
            </div>
            "#,
        );

        let matches = parse_matches(&html, DATE);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].championship, NO_CHAMPIONSHIP);
    }
}
