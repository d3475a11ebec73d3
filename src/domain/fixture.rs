//! Embedded fallback event data.
//!
//! Used verbatim (order preserved) whenever the remote feed is unavailable.
//! Dates are expressed as offsets from the load day so the fixture never
//! goes stale.

use chrono::{Days, Local, NaiveDate};

use super::{EventId, EventRecord};
use super::event_record::DEFAULT_SUITABILITY;

/// One fixture entry with a day offset instead of a date.
#[derive(Debug, Clone, Copy)]
struct FixtureEvent {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    day_offset: u64,
    time: &'static str,
    location: &'static str,
    category: &'static str,
    city: &'static str,
    is_indoor: bool,
    is_free: bool,
    has_parking: bool,
    child_friendly: bool,
    weather_dependent: bool,
    rain_cancellation: &'static str,
}

const SOURCE_URL: &str = "https://example.com";

const FIXTURE: [FixtureEvent; 12] = [
    FixtureEvent {
        id: "fx-01",
        title: "つくばみらい市 夏祭り",
        description: "地域の夏祭りです。盆踊り、屋台、花火大会があります。",
        day_offset: 7,
        time: "18:00",
        location: "つくばみらい市中央公園（つくばみらい市）",
        category: "地域",
        city: "つくばみらい市",
        is_indoor: false,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: true,
        rain_cancellation: "小雨決行",
    },
    FixtureEvent {
        id: "fx-02",
        title: "守谷市 図書館講座",
        description: "読書感想文の書き方講座です。小学生向け。",
        day_offset: 3,
        time: "14:00",
        location: "守谷市立図書館（守谷市）",
        category: "教育",
        city: "守谷市",
        is_indoor: true,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-03",
        title: "取手市 スポーツフェスティバル",
        description: "各種スポーツ体験ができるイベントです。",
        day_offset: 5,
        time: "10:00",
        location: "取手市総合運動公園（取手市）",
        category: "スポーツ",
        city: "取手市",
        is_indoor: false,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: true,
        rain_cancellation: "雨天中止",
    },
    FixtureEvent {
        id: "fx-04",
        title: "つくば市 科学実験教室",
        description: "子供向けの科学実験教室です。",
        day_offset: 2,
        time: "13:30",
        location: "つくば市科学館（つくば市）",
        category: "教育",
        city: "つくば市",
        is_indoor: true,
        is_free: false,
        has_parking: true,
        child_friendly: true,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-05",
        title: "常総市 農業体験",
        description: "稲刈り体験と農産物直売会です。",
        day_offset: 10,
        time: "09:00",
        location: "常総市農業センター（常総市）",
        category: "地域",
        city: "常総市",
        is_indoor: false,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: true,
        rain_cancellation: "雨天順延",
    },
    FixtureEvent {
        id: "fx-06",
        title: "龍ケ崎市 音楽コンサート",
        description: "地域の音楽家によるクラシックコンサートです。",
        day_offset: 4,
        time: "19:00",
        location: "龍ケ崎市文化会館（龍ケ崎市）",
        category: "文化",
        city: "龍ケ崎市",
        is_indoor: true,
        is_free: false,
        has_parking: true,
        child_friendly: false,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-07",
        title: "古河市 歴史散歩",
        description: "古河の歴史を学ぶ散歩ツアーです。",
        day_offset: 6,
        time: "14:00",
        location: "古河市役所前（古河市）",
        category: "文化",
        city: "古河市",
        is_indoor: false,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: true,
        rain_cancellation: "小雨決行",
    },
    FixtureEvent {
        id: "fx-08",
        title: "坂東市 子育てサロン",
        description: "0-3歳児と保護者向けの子育てサロンです。",
        day_offset: 1,
        time: "10:00",
        location: "坂東市子育て支援センター（坂東市）",
        category: "子育て",
        city: "坂東市",
        is_indoor: true,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-09",
        title: "つくばみらい市 親子リトミック",
        description: "音楽に合わせて体を動かす親子向けリトミック教室です。",
        day_offset: 8,
        time: "10:30",
        location: "つくばみらい市きらくやまふれあいの丘（つくばみらい市）",
        category: "子育て",
        city: "つくばみらい市",
        is_indoor: true,
        is_free: true,
        has_parking: true,
        child_friendly: true,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-10",
        title: "つくば市 クラフトビールフェスタ",
        description: "県内外のブルワリーが集まる屋外フェスです。",
        day_offset: 12,
        time: "12:00",
        location: "つくば市中央公園（つくば市）",
        category: "グルメ",
        city: "つくば市",
        is_indoor: false,
        is_free: false,
        has_parking: false,
        child_friendly: false,
        weather_dependent: true,
        rain_cancellation: "雨天中止",
    },
    FixtureEvent {
        id: "fx-11",
        title: "守谷市 陶芸体験ワークショップ",
        description: "手びねりで湯のみを作る陶芸体験です。材料費がかかります。",
        day_offset: 9,
        time: "13:00",
        location: "守谷市中央公民館（守谷市）",
        category: "文化",
        city: "守谷市",
        is_indoor: true,
        is_free: false,
        has_parking: true,
        child_friendly: true,
        weather_dependent: false,
        rain_cancellation: "",
    },
    FixtureEvent {
        id: "fx-12",
        title: "坂東市 菅生沼バードウォッチング",
        description: "野鳥観察会です。双眼鏡の貸出があります。",
        day_offset: 11,
        time: "07:00",
        location: "坂東市自然博物館前（坂東市）",
        category: "自然",
        city: "坂東市",
        is_indoor: false,
        is_free: false,
        has_parking: true,
        child_friendly: true,
        weather_dependent: true,
        rain_cancellation: "雨でも開催",
    },
];

/// Fixture events dated relative to today (local time).
#[must_use]
pub fn events() -> Vec<EventRecord> {
    events_for(Local::now().date_naive())
}

/// Fixture events dated relative to `today`.
#[must_use]
pub fn events_for(today: NaiveDate) -> Vec<EventRecord> {
    FIXTURE.iter().map(|f| f.to_record(today)).collect()
}

/// Number of fixture events.
#[must_use]
pub const fn len() -> usize {
    FIXTURE.len()
}

impl FixtureEvent {
    fn to_record(self, today: NaiveDate) -> EventRecord {
        let date = today
            .checked_add_days(Days::new(self.day_offset))
            .unwrap_or(today);
        EventRecord {
            id: EventId::new(self.id),
            title: self.title.to_string(),
            date,
            time: Some(self.time.to_string()),
            location: Some(self.location.to_string()),
            description: Some(self.description.to_string()),
            category: self.category.to_string(),
            is_free: self.is_free,
            has_parking: self.has_parking,
            child_friendly: self.child_friendly,
            is_indoor: self.is_indoor,
            weather_dependent: Some(self.weather_dependent),
            rain_cancellation: (!self.rain_cancellation.is_empty())
                .then(|| self.rain_cancellation.to_string()),
            source_url: Some(SOURCE_URL.to_string()),
            source_city: Some(self.city.to_string()),
            suitability_score: DEFAULT_SUITABILITY,
        }
    }
}
