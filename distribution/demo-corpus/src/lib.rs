//! Shared sample corpus for tests and benchmarks.
//!
//! Fully pointed verses in canonical order. The Psalms refrain appears three times
//! with identical text, and "Song of Songs" exercises a multi-word book name.

use once_cell::sync::Lazy;

pub struct DemoVerse {
    pub section: &'static str,
    pub book: &'static str,
    pub chapter: u32,
    pub verse: u32,
    pub hebrew: &'static str,
}

/// "Give thanks to the LORD, for He is good; His mercy endures forever"
pub const PSALM_REFRAIN: &str = "הוֹדוּ לַיהוָה כִּי־טוֹב כִּי לְעוֹלָם חַסְדּוֹ׃";

pub const DEMO_VERSES: &[DemoVerse] = &[
    DemoVerse {
        section: "Torah",
        book: "Genesis",
        chapter: 1,
        verse: 1,
        hebrew: "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ׃",
    },
    DemoVerse {
        section: "Torah",
        book: "Genesis",
        chapter: 1,
        verse: 2,
        hebrew: "וְהָאָרֶץ הָיְתָה תֹהוּ וָבֹהוּ וְחֹשֶׁךְ עַל־פְּנֵי תְהוֹם וְרוּחַ אֱלֹהִים מְרַחֶפֶת עַל־פְּנֵי הַמָּיִם׃",
    },
    DemoVerse {
        section: "Torah",
        book: "Genesis",
        chapter: 1,
        verse: 3,
        hebrew: "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר וַיְהִי־אוֹר׃",
    },
    DemoVerse {
        section: "Torah",
        book: "Genesis",
        chapter: 1,
        verse: 4,
        hebrew: "וַיַּרְא אֱלֹהִים אֶת־הָאוֹר כִּי־טוֹב וַיַּבְדֵּל אֱלֹהִים בֵּין הָאוֹר וּבֵין הַחֹשֶׁךְ׃",
    },
    DemoVerse {
        section: "Torah",
        book: "Genesis",
        chapter: 1,
        verse: 5,
        hebrew: "וַיִּקְרָא אֱלֹהִים לָאוֹר יוֹם וְלַחֹשֶׁךְ קָרָא לָיְלָה וַיְהִי־עֶרֶב וַיְהִי־בֹקֶר יוֹם אֶחָד׃",
    },
    DemoVerse {
        section: "Ketuvim",
        book: "Psalms",
        chapter: 118,
        verse: 1,
        hebrew: PSALM_REFRAIN,
    },
    DemoVerse {
        section: "Ketuvim",
        book: "Psalms",
        chapter: 118,
        verse: 29,
        hebrew: PSALM_REFRAIN,
    },
    DemoVerse {
        section: "Ketuvim",
        book: "Psalms",
        chapter: 136,
        verse: 1,
        hebrew: PSALM_REFRAIN,
    },
    DemoVerse {
        section: "Ketuvim",
        book: "Song of Songs",
        chapter: 2,
        verse: 1,
        hebrew: "אֲנִי חֲבַצֶּלֶת הַשָּׁרוֹן שׁוֹשַׁנַּת הָעֲמָקִים׃",
    },
];

/// `DEMO_VERSES` rendered in the corpus CSV layout
pub static DEMO_CSV: Lazy<String> = Lazy::new(|| {
    to_csv(DEMO_VERSES).expect("demo corpus serializes to CSV")
});

/// Render verses as `section,book,chapter,verse,hebrew` CSV
pub fn to_csv(verses: &[DemoVerse]) -> csv::Result<String> {
    write_csv(verses.iter().map(|v| (v, v.chapter)))
}

/// Repeat the demo corpus `copies` times under distinct chapter numbers,
/// for benchmarks that need a larger corpus.
pub fn repeated_csv(copies: u32) -> csv::Result<String> {
    write_csv((0..copies).flat_map(|copy| {
        DEMO_VERSES.iter().map(move |v| (v, v.chapter + copy * 1000))
    }))
}

fn write_csv<'a>(rows: impl Iterator<Item = (&'a DemoVerse, u32)>) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "book", "chapter", "verse", "hebrew"])?;
    for (v, chapter) in rows {
        writer.write_record([
            v.section,
            v.book,
            chapter.to_string().as_str(),
            v.verse.to_string().as_str(),
            v.hebrew,
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
