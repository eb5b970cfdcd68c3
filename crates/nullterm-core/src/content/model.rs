use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

/// One entry of the simulated file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub kind: NodeKind,
    pub tooltip: String,
    pub icon: String,
    #[serde(default)]
    pub content: Option<FileContent>,
}

/// Body of a file. The `type` tag picks exactly one presentation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FileContent {
    Markup {
        text: String,
    },
    GettingStarted(GettingStarted),
    AboutNullEec(AboutNullEec),
    AboutEec(AboutEec),
    PastEventsRedesigned(PastEvents),
    PhotoCollage(PhotoCollage),
    ContactUs(ContactUs),
    EventList {
        events: Vec<Event>,
    },
    TeamRoster {
        members: Vec<TeamMember>,
    },
}

impl FileContent {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Markup { .. } => "markup",
            Self::GettingStarted(_) => "getting-started",
            Self::AboutNullEec(_) => "about-null-eec",
            Self::AboutEec(_) => "about-eec",
            Self::PastEventsRedesigned(_) => "past-events-redesigned",
            Self::PhotoCollage(_) => "photo-collage",
            Self::ContactUs(_) => "contact-us",
            Self::EventList { .. } => "event-list",
            Self::TeamRoster { .. } => "team-roster",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    pub intro: String,
    pub stats: Vec<Stat>,
    /// Shortcut cards into the store, shown above the quick commands.
    #[serde(default)]
    pub quick_links: Vec<NavCard>,
    pub quick_commands: Vec<QuickCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCommand {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// A titled group of items; most templates are a stack of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoCard {
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub icon: Option<String>,
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub closing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GettingStarted {
    pub hero: Hero,
    pub quick_start: Section<InfoCard>,
    pub navigation: Section<NavCard>,
    pub features: Section<InfoCard>,
    pub tips: Section<Tip>,
    pub pathways: Section<Pathway>,
    pub stats: Vec<Stat>,
}

/// Card that points at another file in the store by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavCard {
    pub target: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutNullEec {
    pub hero: Hero,
    pub mission: Section<InfoCard>,
    pub activities: Section<ActivityGroup>,
    pub philosophy: Section<InfoCard>,
    pub features: Section<InfoCard>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityGroup {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub items: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutEec {
    pub hero: Hero,
    pub stats: Section<Stat>,
    pub departments: Section<InfoCard>,
    pub accreditations: Section<InfoCard>,
    pub clubs: Section<InfoCard>,
    pub placements: Section<CompanyGroup>,
    pub contact: EecContact,
    pub vision: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub icon: String,
    pub title: String,
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EecContact {
    pub title: String,
    pub address: Vec<String>,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub icon: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastEvents {
    pub hero: Hero,
    pub stats: Section<Stat>,
    pub categories: Section<InfoCard>,
    pub featured: Section<FeaturedEvent>,
    pub metrics: Section<MetricGroup>,
    pub testimonials: Section<Testimonial>,
    pub timeline: Section<Milestone>,
    pub upcoming: Section<InfoCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedEvent {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub category: String,
    pub participants: String,
    pub duration: String,
    pub prize_pool: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub topics: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub icon: String,
    pub title: String,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub event: String,
    pub quote: String,
    pub achievement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: String,
    pub quarter: String,
    pub title: String,
    pub events: Vec<String>,
    pub participants: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCollage {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub photos: Vec<Photo>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    pub caption: String,
    pub event: String,
    pub category: String,
    pub size: PhotoSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactUs {
    pub hero: Hero,
    pub quick_connect: Section<ConnectChannel>,
    pub categories: Section<ContactCategory>,
    pub leadership: Section<LeadershipContact>,
    pub location: Location,
    pub faq: Section<FaqGroup>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectChannel {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub links: Vec<String>,
    pub response_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCategory {
    pub icon: String,
    pub title: String,
    pub email: String,
    pub response_time: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadershipContact {
    pub icon: String,
    pub title: String,
    pub phone: String,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub place: String,
    pub address: Vec<String>,
    pub coordinates: String,
    pub hours: Vec<Schedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub icon: String,
    pub title: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqGroup {
    pub icon: String,
    pub title: String,
    pub entries: Vec<Faq>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub description: String,
    pub speaker: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub department: String,
    pub year: String,
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}
