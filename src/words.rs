//! Fixed word lists for label rendering.
//!
//! Slots map to positions, not words: editing or reordering an entry renames
//! every slot that uses it without touching stored assignments.

pub const ADJECTIVES: [&str; 100] = [
	"Amber", "Ancient", "Agile", "Azure", "Bold", "Brave", "Breezy", "Bright", "Brisk",
	"Calm", "Candid", "Clever", "Cobalt", "Cosmic", "Crimson", "Curious", "Daring",
	"Dapper", "Dusky", "Eager", "Early", "Electric", "Emerald", "Fearless", "Fierce",
	"Gentle", "Gilded", "Glad", "Golden", "Graceful", "Grand", "Happy", "Hardy", "Honest",
	"Humble", "Icy", "Jolly", "Keen", "Kind", "Lively", "Lucky", "Lunar", "Mellow", "Merry",
	"Mighty", "Misty", "Modest", "Nimble", "Noble", "Northern", "Patient", "Plucky",
	"Polite", "Proud", "Quick", "Quiet", "Radiant", "Rapid", "Rosy", "Royal", "Rustic",
	"Scarlet", "Serene", "Sharp", "Shiny", "Silent", "Silver", "Sleek", "Smart", "Snowy",
	"Solar", "Spry", "Stable", "Steady", "Stellar", "Stormy", "Sturdy", "Sunny", "Swift",
	"Tender", "Thrifty", "Tidy", "Timely", "Tranquil", "Trusty", "Upbeat", "Valiant",
	"Velvet", "Vivid", "Warm", "Wary", "Wild", "Windy", "Wise", "Witty", "Young", "Zealous",
	"Zesty", "Violet", "Jade",
];

pub const ANIMALS: [&str; 100] = [
	"Badger", "Bat", "Bear", "Beaver", "Bison", "Boar", "Bobcat", "Camel", "Caribou", "Cat",
	"Cheetah", "Cobra", "Condor", "Cougar", "Coyote", "Crane", "Crow", "Deer", "Dingo",
	"Dolphin", "Donkey", "Dove", "Duck", "Eagle", "Eel", "Elk", "Falcon", "Ferret", "Finch",
	"Fox", "Frog", "Gazelle", "Gecko", "Goat", "Goose", "Gopher", "Hare", "Hawk",
	"Hedgehog", "Heron", "Hippo", "Horse", "Hyena", "Ibex", "Iguana", "Jackal", "Jaguar",
	"Koala", "Lemur", "Leopard", "Lion", "Llama", "Lynx", "Magpie", "Marmot", "Marten",
	"Mink", "Mole", "Moose", "Mouse", "Newt", "Ocelot", "Otter", "Owl", "Panda", "Panther",
	"Parrot", "Pelican", "Penguin", "Pike", "Puffin", "Puma", "Quail", "Rabbit", "Raccoon",
	"Raven", "Robin", "Salmon", "Seal", "Shark", "Sparrow", "Squid", "Stork", "Swan",
	"Tapir", "Tiger", "Toad", "Trout", "Turtle", "Viper", "Walrus", "Weasel", "Whale",
	"Wolf", "Wombat", "Wren", "Yak", "Zebra", "Orca", "Gannet",
];

pub const CONCEPTS: [&str; 100] = [
	"Anchor", "Arrow", "Atlas", "Aurora", "Beacon", "Blaze", "Bloom", "Breeze", "Bridge",
	"Canyon", "Cascade", "Cipher", "Comet", "Compass", "Coral", "Crest", "Crystal",
	"Current", "Dawn", "Delta", "Drift", "Dune", "Echo", "Ember", "Field", "Flame", "Flare",
	"Forest", "Frost", "Galaxy", "Garden", "Glade", "Glow", "Harbor", "Haven", "Horizon",
	"Island", "Key", "Lantern", "Light", "Meadow", "Meteor", "Mist", "Moon", "Nebula",
	"Night", "Note", "Oasis", "Ocean", "Orbit", "Path", "Peak", "Pebble", "Pixel", "Prism",
	"Pulse", "Quartz", "Rain", "Rapids", "Reef", "Ridge", "River", "Rock", "Rune", "Sail",
	"Shadow", "Signal", "Sky", "Snow", "Spark", "Spring", "Star", "Stone", "Storm",
	"Stream", "Summit", "Sun", "Thunder", "Tide", "Trail", "Valley", "Vector", "Voice",
	"Wave", "Willow", "Wind", "Wing", "Winter", "Zenith", "Code", "Flow", "Ice", "Fire",
	"Lumen", "Sound", "Ray", "Glint", "Loom", "Grove", "Thicket",
];
