use serde::Serialize;

use super::domain::{Question, QuestionType, QuizOption};

/// Version published alongside the public catalog projection.
pub const CATALOG_VERSION: u32 = 1;

/// Fixed set of quiz questions plus the order in which the quiz walks them.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    version: u32,
    questions: Vec<Question>,
    flow: Vec<String>,
}

/// Public projection returned to clients; carries no scoring data.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub version: u32,
    pub flow: Vec<String>,
    pub questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn standard() -> Self {
        Self::new(CATALOG_VERSION, standard_questions(), standard_flow())
    }

    pub fn new(version: u32, questions: Vec<Question>, flow: Vec<String>) -> Self {
        Self {
            version,
            questions,
            flow,
        }
    }

    /// Catalog whose flow is the declaration order of `questions`.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let flow = questions.iter().map(|question| question.id.clone()).collect();
        Self::new(CATALOG_VERSION, questions, flow)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn flow(&self) -> &[String] {
        &self.flow
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// Declaration index of a question, used to order reflected answers.
    pub fn position(&self, question_id: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == question_id)
    }

    pub fn option_label(&self, question_id: &str, option_id: &str) -> Option<&str> {
        self.question(question_id)
            .and_then(|question| question.option_label(option_id))
    }

    /// Label of the first option with this id across all questions, or the id itself.
    pub fn label_for_option(&self, option_id: &str) -> String {
        self.find_option_label(option_id)
            .unwrap_or(option_id)
            .to_string()
    }

    /// Prefers the question's own option, then any option with the same id.
    pub fn resolve_label(&self, question_id: &str, option_id: &str) -> String {
        self.option_label(question_id, option_id)
            .or_else(|| self.find_option_label(option_id))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown option ({option_id})"))
    }

    fn find_option_label(&self, option_id: &str) -> Option<&str> {
        self.questions
            .iter()
            .flat_map(|question| question.options.iter())
            .find(|option| option.id == option_id)
            .map(|option| option.label.as_str())
    }

    /// Questions in quiz order; flow entries without a definition are left out.
    pub fn flow_questions(&self) -> Vec<&Question> {
        self.flow
            .iter()
            .filter_map(|question_id| self.question(question_id))
            .collect()
    }

    /// Flow entries that reference no defined question.
    pub fn flow_issues(&self) -> Vec<&str> {
        self.flow
            .iter()
            .filter(|question_id| self.question(question_id).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn view(&self) -> CatalogView {
        CatalogView {
            version: self.version,
            flow: self.flow.clone(),
            questions: self.questions.clone(),
        }
    }
}

fn question(
    id: &str,
    prompt: &str,
    kind: QuestionType,
    options: &[(&str, &str)],
) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind,
        options: options
            .iter()
            .map(|(id, label)| QuizOption {
                id: id.to_string(),
                label: label.to_string(),
            })
            .collect(),
        skippable: true,
    }
}

fn standard_flow() -> Vec<String> {
    [
        "where_craft",
        "space",
        "social",
        "computers",
        "mess",
        "sensory_avoid",
        "tools_danger",
        "work_style",
        "duration",
        "repeatability",
        "mental_energy",
        "shopping",
        "hand_confidence",
        "perfection",
        "style",
        "produce",
        "outputs",
        "waste",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn standard_questions() -> Vec<Question> {
    use QuestionType::{Multi, Single};

    vec![
        // Context and environment
        question(
            "where_craft",
            "Where are you more likely to craft?",
            Single,
            &[
                ("where_tv", "In front of the TV"),
                ("where_space", "In a dedicated craft space"),
                ("where_table", "At a kitchen/dining table"),
                ("where_plane", "On a plane"),
            ],
        ),
        question(
            "space",
            "How much space do you work in?",
            Single,
            &[
                ("space_lap", "On my lap"),
                ("space_small_desk", "At a small desk"),
                ("space_large", "A large workspace"),
                ("space_floor", "Sprawled out across the floor"),
            ],
        ),
        question(
            "social",
            "How social do you like your craft?",
            Single,
            &[
                ("social_inherently", "I love an inherently, fundamentally social craft"),
                ("social_chatty", "I love crafts I can do while chatting or talking on the phone"),
                ("social_me_time", "Crafts are my me-time, and I want to keep it that way"),
            ],
        ),
        question(
            "computers",
            "How do you want computers to add to your craft?",
            Single,
            &[
                ("computers_analogue_only", "Craft is my analogue-only, screen-free time"),
                ("computers_helpful", "I can use computers to help me, but it’s primarily an IRL pastime"),
                ("computers_digital_tools", "I love using available digital tools and programs to help me create things"),
                ("computers_digital_first", "I love primarily digitally created crafts"),
            ],
        ),
        // Sensory and household constraints
        question(
            "mess",
            "How tolerant are you of mess?",
            Single,
            &[
                ("mess_joyful", "Life is full of wonderful mess, and my craft is no different"),
                ("mess_low_cleaning", "Cleaning should not be a significant feature of any craft I undertake"),
                ("mess_visitors_ready", "I expect to put my craft down and have visitors immediately, with no more than a couple of seconds of tidying"),
                ("mess_editorial", "I want a beautiful, spartan workspace that consistently looks like an editorial photo"),
            ],
        ),
        question(
            "sensory_avoid",
            "Are there any sensory experiences you really don’t enjoy while crafting?",
            Multi,
            &[
                ("sensory_no_smell", "Nothing smelly"),
                ("sensory_no_sticky", "Nothing sticky or oily"),
                ("sensory_no_dust", "Nothing dusty"),
                ("sensory_no_noise", "Nothing noisy"),
            ],
        ),
        question(
            "tools_danger",
            "How sharp or dangerous can the tools be?",
            Single,
            &[
                ("tools_toddler_safe", "A toddler could play with the tools unsupervised, safely"),
                ("tools_hazard_ok", "I respect the tools and materials and can be trusted with hazardous things"),
                ("tools_low_stress", "I’m an adult, but don’t want to make life stressful either"),
            ],
        ),
        // Time, rhythm and repetition
        question(
            "work_style",
            "How do you prefer to work on crafts?",
            Single,
            &[
                ("work_uninterrupted", "Hours of uninterrupted work"),
                ("work_one_session", "Start and finish in one session"),
                ("work_tiny_chunks", "In tiny chunks"),
            ],
        ),
        question(
            "duration",
            "How long do you want your next craft to last?",
            Single,
            &[
                ("duration_afternoon", "A fun afternoon sounds wonderful"),
                ("duration_days_weeks", "A couple of days or weeks to complete would be satisfying"),
                ("duration_months", "Months of work gives me a rush of accomplishment"),
            ],
        ),
        question(
            "repeatability",
            "Do you want to repeat a method or craft across multiple projects?",
            Single,
            &[
                ("repeat_new_often", "I love trying a new thing as often as possible"),
                ("repeat_a_few_times", "I like to repeat a few times until I’m interested in something new"),
                ("repeat_master_one", "I like the comfort and mastery of one craft repeated"),
            ],
        ),
        // Energy, planning and process
        question(
            "mental_energy",
            "How much mental energy do you like to put in?",
            Single,
            &[
                ("energy_meditative", "Hardly have to think twice, just repeat steps until finished; nearly meditative"),
                ("energy_tips_flow", "Follow some basic tips and instructions, but go with the flow"),
                ("energy_clear_steps", "Follow clear steps, and feel the stages of a project be completed"),
                ("energy_plan_myself", "I enjoy planning it out and working out how I get to the result myself"),
                ("energy_physical_puzzle", "I love a challenging problem to solve physically"),
            ],
        ),
        question(
            "shopping",
            "Do you enjoy shopping for materials?",
            Single,
            &[
                ("shop_fun", "It’s part of the fun"),
                ("shop_upgrade", "I like rewarding myself with an upgraded tool or material"),
                ("shop_use_what_i_have", "I like to mostly use what I have"),
                ("shop_hate_choosing", "Choosing what to get is the worst part of the process"),
            ],
        ),
        // Skill, control and imperfection
        question(
            "hand_confidence",
            "How confident are you with your hands?",
            Single,
            &[
                ("hands_good", "I’ve got good hand–eye coordination"),
                ("hands_fine", "I’m fine, not brilliant"),
                ("hands_shaky", "I’m a bit loose or shaky"),
                ("hands_low", "I’ve got low coordination"),
            ],
        ),
        question(
            "perfection",
            "How perfect do you want the result to be?",
            Single,
            &[
                ("perfect_accidents_ok", "Randomness and accidents are part of the process"),
                ("perfect_fix_some", "I want it to look handmade, but will fix some mistakes"),
                ("perfect_flawless", "I want it to look flawless"),
            ],
        ),
        // Aesthetics, outputs and values
        question(
            "style",
            "What kind of style do you want the outcome to be?",
            Single,
            &[
                ("style_modern", "Cool and modern"),
                ("style_cosy", "Cosy and homely"),
                ("style_classic", "Classic and traditional"),
                ("style_kawaii", "Adorable and kawaii"),
                ("style_natural", "Natural and chic"),
                ("style_quirky", "Quirky and unique"),
                ("style_minimal", "Minimal and restrained"),
                ("style_maximal", "Bold and maximalist"),
            ],
        ),
        question(
            "produce",
            "What would you prefer to produce?",
            Single,
            &[
                ("produce_beautiful_functional", "Something beautiful and functional"),
                ("produce_beautiful", "Something beautiful"),
                ("produce_functional", "Something functional"),
            ],
        ),
        question(
            "outputs",
            "What do you do with the outputs?",
            Single,
            &[
                ("output_gifts", "Presents for people"),
                ("output_decor", "Home décor"),
                ("output_functional_life", "Functional additions to daily life"),
                ("output_store_look", "Put them away and look at them occasionally"),
                ("output_ephemeral", "I enjoy ephemeral and temporary outputs"),
                ("output_dont_care", "I don’t care what happens to it afterwards"),
            ],
        ),
        question(
            "waste",
            "How much do you want to minimise waste?",
            Single,
            &[
                ("waste_not_worried", "I produce very little waste generally, so I’m not worried"),
                ("waste_mindful", "I try to be mindful, but it’s not a constraint"),
                ("waste_use_waste", "I would prefer to use things that are already waste"),
            ],
        ),
    ]
}
