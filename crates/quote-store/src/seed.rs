// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Built-in seed data for both quote collections

use crate::annotated::AnnotatedQuote;

/// Seed quotes for the flat collection
pub const QUOTES: [&str; 10] = [
    "There is nothing either good or bad but thinking makes it so.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_109527",
    "The course of true love never did run smooth.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_109526",
    "Some are born great, some achieve greatness, and some have greatness thrust upon them.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_101484",
    "What's in a name? That which we call a rose by any other name would smell as sweet.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_125207",
    "Good night, good night! Parting is such sweet sorrow, that I shall say good night till it be morrow.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_155061",
    "How far that little candle throws its beams! So shines a good deed in a naughty world.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_155088",
    "Better three hours too soon than a minute too late.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_139153",
    "There is no darkness but ignorance.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_138212",
    "All the world's a stage, and all the men and women merely players: they have their exits and their entrances; and one man in his time plays many parts, his acts being seven ages.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_166828",
    "Cowards die many times before their deaths; the valiant never taste of death but once.  Read more at: https://www.brainyquote.com/quotes/william_shakespeare_104447",
];

/// Seed rows for the annotated collection: quote, play, verse, speaker, iambs
///
/// Row 0 is a header row whose values are the field names. It is served like
/// any other record.
const ANNOTATED: [[&str; 5]; 10] = [
    ["quote", "play", "verse", "spaketh", "iambs"],
    [
        "To be, or not to be: that is the question",
        "Hamlet",
        "Act III, Scene I",
        "Prince Hamlet",
        "to BE - or NOT - to BE - that IS - the QUESTION",
    ],
    [
        "What's in a name? That which we call a rose by any other name would smell as sweet",
        "Romeo and Juliet",
        "Act II, Scene II",
        "Juliet",
        "what's IN - a NAME - that WHICH - we CALL - a ROSE - by ANY - other NAME - would SMELL - as SWEET",
    ],
    [
        "But, soft! What light through yonder window breaks?",
        "Romeo and Juliet",
        "Act II Scene II",
        "Romeo",
        "but SOFT - what LIGHT - through YON - der win - dow BREAKS?",
    ],
    [
        "O, Romeo, Romeo, where for art thou, Romeo",
        "Romeo and Juliet",
        "Act II Scene II",
        "Juliet",
        "O ROMeo - ROM eo - WHEREfore - ART thou - ROMeo",
    ],
    [
        "Friends, Romans, countrymen lend me your ears. I come to bury Caesar, not praise him!",
        "Julius Caesar",
        "Act III, Scene II",
        "Mark Antony",
        "FRIENDS - ROMANS - COUNTRYMEN - lend ME - your EARS - i COME - to BURY - caesar NOT - praise HIM",
    ],
    [
        "All the worlds a stage and all the men and women merely players",
        "As You Like It",
        "Act II, Scene VII",
        "Jacques",
        "all THE - worlds a STAGE - and ALL - the MEN - and WOMEN  - mere LY - play ERS",
    ],
    [
        "If music be the food of love, play on",
        "Twelfth Night",
        "Act I, Scene I",
        "Duke Orsino",
        "if MU - sic BE - the FOOD - of LOVE - play ON",
    ],
    [
        "Double, double, toil and trouble, fire burn and cauldron bubble",
        "Macbeth",
        "Act IV, Scene I",
        "Three Witches",
        "[Long Trochee] DOUble - DOUble - TOIL and - TROUble - FIre - BURN and - CAULdron - BUbble",
    ],
    [
        "Cry 'Havoc!', and let slip the dogs of war",
        "Julius Caesar",
        "Act III, Scene I",
        "Mark Antony",
        "cry HAV - oc AND - let SLIP - the DOGS - of WAR",
    ],
];

/// Owned copies of the flat seed quotes
pub fn quotes() -> Vec<String> {
    QUOTES.iter().map(ToString::to_string).collect()
}

/// Owned copies of the annotated seed records
pub fn annotated_quotes() -> Vec<AnnotatedQuote> {
    ANNOTATED
        .iter()
        .map(|[quote, play, verse, spaketh, iambs]| AnnotatedQuote {
            quote: (*quote).to_string(),
            play: (*play).to_string(),
            verse: (*verse).to_string(),
            spaketh: (*spaketh).to_string(),
            iambs: (*iambs).to_string(),
        })
        .collect()
}
