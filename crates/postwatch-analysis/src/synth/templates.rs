//! Post texts and domains the generator draws from.

pub const LEGITIMATE_POSTS: [&str; 25] = [
    "Just finished reading an amazing book! Highly recommend it.",
    "Beautiful sunset at the beach today. Nature is incredible.",
    "Congratulations to our team for winning the championship!",
    "Happy birthday to my best friend! Hope you have a wonderful day.",
    "Check out this recipe I tried today. It turned out delicious!",
    "Excited to announce my new job at ABC Company!",
    "Family gathering this weekend was so much fun.",
    "Just adopted a cute puppy. Meet Max!",
    "Loving the new coffee shop downtown. Great atmosphere.",
    "Finished my first marathon today! Feeling accomplished.",
    "Great concert last night. The band was fantastic.",
    "Just planted some vegetables in my garden.",
    "Movie night with friends. Perfect way to end the week.",
    "Celebrating our anniversary today. Love you honey!",
    "Morning workout complete. Ready to start the day!",
    "Proud of my little sister for graduating with honors!",
    "Amazing day volunteering at the local shelter.",
    "Tried a new restaurant today and the food was incredible!",
    "So grateful for the support of my friends and family.",
    "Watching the stars tonight \u{2014} feeling peaceful and blessed.",
    "New blog post is up! Sharing my travel experiences from Japan.",
    "Weekend hike was breathtaking. Can\u{2019}t wait to go back!",
    "Learning to play the guitar \u{2014} progress feels great!",
    "Supporting local businesses is always a good idea.",
    "Just finished a coding project I\u{2019}ve been working on for weeks!",
];

pub const MISINFORMATION_POSTS: [&str; 25] = [
    "BREAKING! Scientists discover cure for all diseases! Government hiding it from you!",
    "SHOCKING truth about vaccines that doctors don't want you to know!",
    "You won't believe what celebrities are secretly doing! Click now!",
    "URGENT! This miracle remedy will change your life forever!",
    "Secret government plan EXPOSED! Share before it's deleted!",
    "BANNED by mainstream media! The truth they don't want you to see!",
    "Amazing discovery that pharmaceutical companies are hiding!",
    "This one weird trick will solve all your problems instantly!",
    "BREAKING NEWS: Celebrity died! (actually fake) Share now!",
    "Doctors HATE this simple method! Click to learn more!",
    "Government conspiracy REVEALED! Wake up people!",
    "Miracle weight loss secret banned in 5 countries!",
    "SHOCKING evidence of alien cover-up! Must see!",
    "This natural cure DESTROYS cancer! Big pharma doesn't want you to know!",
    "URGENT WARNING! Something terrible happening right now!",
    "Bill Gates caught on camera spreading viruses \u{2014} share this before it\u{2019}s removed!",
    "NASA admits the moon landing was faked all along!",
    "Drinking lemon water can instantly cure COVID-19!",
    "World leaders secretly meeting to control the weather!",
    "Hidden message found in the new company logo \u{2014} proof of global control!",
    "Doctors confirm: chocolate can extend your life by 50 years!",
    "The government is replacing birds with surveillance drones!",
    "Aliens have been living among us since 1947 \u{2014} scientists confirm!",
    "Scientists admit the Earth is actually flat!",
    "Cure for diabetes found but kept secret for profit!",
];

pub const SUSPICIOUS_DOMAINS: [&str; 15] = [
    "fakenews-source.net",
    "clickbait-central.com",
    "conspiracy-truth.org",
    "miracle-cures.net",
    "shocking-news-daily.com",
    "banned-truth.info",
    "secret-revelations.org",
    "viral-hoax.net",
    "truth-exposed.today",
    "hiddenfactsworld.com",
    "the-real-insider.net",
    "beforetheydelete.com",
    "fakehealthtips.org",
    "deepstateupdate.info",
    "worldalert24.net",
];

pub const LEGITIMATE_DOMAINS: [&str; 15] = [
    "nytimes.com",
    "bbc.com",
    "wikipedia.org",
    "national-geographic.com",
    "scientificamerican.com",
    "reuters.com",
    "nature.com",
    "theguardian.com",
    "cnn.com",
    "forbes.com",
    "bloomberg.com",
    "nasa.gov",
    "who.int",
    "un.org",
    "time.com",
];

/// Suffix appended to some legitimate posts.
pub const HASHTAG_SUFFIX: &str = " #blessed #grateful";
