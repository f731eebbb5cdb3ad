//! Builtin program content — four tracks, four protocol cards each.

use super::{Card, Track};

fn card(
    id: &str,
    card_title: &str,
    card_subtitle: &str,
    technique_title: &str,
    technique_description: &str,
    activation_command: &str,
) -> Card {
    Card {
        id: id.to_string(),
        card_title: card_title.to_string(),
        card_subtitle: card_subtitle.to_string(),
        technique_title: technique_title.to_string(),
        technique_description: technique_description.to_string(),
        activation_command: activation_command.to_string(),
    }
}

pub(super) fn builtin_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "setup".to_string(),
            title: "THE START".to_string(),
            color_tag: "stone".to_string(),
            description: "Mandatory Setup".to_string(),
            cards: vec![
                card(
                    "z1",
                    "YOUR TOPIC",
                    "What you talk about",
                    "POSITIONING VECTOR",
                    "The algorithm sorts creators into clusters. The technique \
                     crosses technical skill with market demand.",
                    "Arthur, start the Vector Diagnostic. Run the interview to \
                     extract my data and find the most profitable market \
                     intersection for me.",
                ),
                card(
                    "z2",
                    "YOUR BRAND",
                    "Name and handle",
                    "SEO INDEXING",
                    "The name (title) exists to be searched and must carry \
                     keywords. The handle exists for branding and must stay clean.",
                    "Start the Naming Protocol. Ask me what you need to understand \
                     my positioning and generate optimized name and handle options.",
                ),
                card(
                    "z3",
                    "YOUR PHOTO",
                    "Profile picture",
                    "CONTRAST SEMIOTICS",
                    "Use figure-ground separation. A solid background opposite to \
                     your clothing color lifts the silhouette and projects \
                     authority in tiny thumbnails.",
                    "Let's validate my profile picture. Begin the analysis with \
                     the questions needed to check my photo meets the authority \
                     requirements.",
                ),
                card(
                    "z4",
                    "YOUR BIO",
                    "Profile summary",
                    "THREE-LINE FUNNEL",
                    "Mandatory conversion structure: 1. Authority (proof) + \
                     2. Promise (benefit) + 3. CTA (command).",
                    "Start building the Conversion Bio. Run the interrogation to \
                     extract the required elements and assemble options following \
                     the funnel.",
                ),
            ],
        },
        Track {
            id: "influencer".to_string(),
            title: "THE CREATOR".to_string(),
            color_tag: "cyan".to_string(),
            description: "Going Viral".to_string(),
            cards: vec![
                card(
                    "i1",
                    "THE HOOK",
                    "3 seconds",
                    "ATTENTION ENGINEERING",
                    "Visual interruption or cognitive paradox at frame zero.",
                    "Arthur, let's build my hooks. Analyze my niche and guide the \
                     creation of 3 pattern-breaking video openers.",
                ),
                card(
                    "i2",
                    "THE EDIT",
                    "Retention",
                    "PACING DYNAMICS",
                    "Change the stimulus every 4 seconds to keep dopamine flowing.",
                    "Start the Editing Protocol. Give me practical instructions for \
                     editing my next video to guarantee retention.",
                ),
                card(
                    "i3",
                    "THE TRIBE",
                    "Real fans",
                    "TRIBAL ENGAGEMENT",
                    "Turn the comment section into a second stage for content.",
                    "Let's engage my base. Suggest which controversy to plant to \
                     trigger a storm of comments.",
                ),
                card(
                    "i4",
                    "THE KIT",
                    "Brands",
                    "COMMERCIAL PRESENTATION",
                    "A one-page media kit proving demographics and engagement.",
                    "Start building my media kit. Ask me about my current numbers.",
                ),
            ],
        },
        Track {
            id: "authority".to_string(),
            title: "THE MASTER".to_string(),
            color_tag: "red".to_string(),
            description: "Sales and Info Products".to_string(),
            cards: vec![
                card(
                    "a1",
                    "THE IDEAS",
                    "4x4 matrix",
                    "CONTENT SYSTEMATIZATION",
                    "1 pain = 4 videos (myth, mistake, tip, analysis).",
                    "Arthur, activate the 4x4 Matrix. Interview me to extract one \
                     pain and generate 4 scripts built on it.",
                ),
                card(
                    "a2",
                    "THE SCRIPT",
                    "Teach and sell",
                    "TROJAN HORSE STRUCTURE",
                    "Give away the diagnosis for free and sell the method at the end.",
                    "Let's write a sales video. Walk me through creating a script \
                     that converts.",
                ),
                card(
                    "a3",
                    "THE MAGNET",
                    "Off the platform",
                    "PLATFORM MIGRATION",
                    "Offer a micro-result (PDF) in exchange for email or phone.",
                    "Start the funnel strategy. Suggest 3 irresistible lead magnet \
                     options.",
                ),
                card(
                    "a4",
                    "THE TRAFFIC",
                    "Scale",
                    "STRATEGIC AMPLIFICATION",
                    "Put ad spend only behind the winning organic video (the outlier).",
                    "Let's scale. Help me define the ads audience for my best video.",
                ),
            ],
        },
        Track {
            id: "shop".to_string(),
            title: "THE SELLER".to_string(),
            color_tag: "emerald".to_string(),
            description: "Physical Products".to_string(),
            cards: vec![
                card(
                    "s1",
                    "THE STOREFRONT",
                    "Trust",
                    "CREDIBILITY HEURISTICS",
                    "Visual signals that reduce purchase friction on a new profile.",
                    "Run a storefront audit. Ask me for my profile details and point \
                     out what is blocking sales.",
                ),
                card(
                    "s2",
                    "THE PAIN",
                    "Sales video",
                    "NEURAL AGITATION",
                    "Agitate the pain before revealing the product.",
                    "Let's create a conversion video. Ask me about the product and \
                     build a pain-first pitch.",
                ),
                card(
                    "s3",
                    "THE REVIEW",
                    "Social proof",
                    "UGC (USER GENERATED)",
                    "Real-customer aesthetics break through the ad filter.",
                    "Write a UGC review that feels 100% spontaneous and sincere.",
                ),
                card(
                    "s4",
                    "THE BOOST",
                    "Ads",
                    "SPARK ADS",
                    "Turn a review into a native ad with a buy button.",
                    "Prepare my Spark Ads campaign and copy to maximize clicks.",
                ),
            ],
        },
    ]
}
