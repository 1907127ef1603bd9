use rand::Rng;

/// How a rule decides whether it applies to a lowercased query.
enum Matcher {
    /// The phrase occurs anywhere in the query.
    Contains(&'static str),
    /// Any one of the phrases occurs.
    AnyOf(&'static [&'static str]),
    /// One phrase from each group occurs.
    AllOf(&'static [&'static [&'static str]]),
}

impl Matcher {
    fn matches(&self, query: &str) -> bool {
        match self {
            Matcher::Contains(phrase) => query.contains(phrase),
            Matcher::AnyOf(phrases) => phrases.iter().any(|p| query.contains(p)),
            Matcher::AllOf(groups) => groups
                .iter()
                .all(|group| group.iter().any(|p| query.contains(p))),
        }
    }
}

struct Rule {
    matcher: Matcher,
    answer: &'static str,
}

const AGE_TOPIC: &[&str] = &["legal age", "age to"];

/// Evaluated top to bottom; the first matching rule answers.
static RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::Contains("contract"),
        answer: CONTRACT,
    },
    Rule {
        matcher: Matcher::Contains("nda"),
        answer: NDA,
    },
    Rule {
        matcher: Matcher::Contains("alimony"),
        answer: ALIMONY,
    },
    Rule {
        matcher: Matcher::Contains("rights as a consumer"),
        answer: CONSUMER_RIGHTS,
    },
    Rule {
        matcher: Matcher::Contains("police complaint"),
        answer: POLICE_COMPLAINT,
    },
    Rule {
        matcher: Matcher::Contains("intellectual property"),
        answer: INTELLECTUAL_PROPERTY,
    },
    Rule {
        matcher: Matcher::Contains("divorce"),
        answer: DIVORCE,
    },
    Rule {
        matcher: Matcher::Contains("legal age to marry"),
        answer: MARRIAGE_AGE,
    },
    Rule {
        matcher: Matcher::Contains("will"),
        answer: WILL,
    },
    Rule {
        matcher: Matcher::Contains("rti"),
        answer: RTI,
    },
    Rule {
        matcher: Matcher::AllOf(&[AGE_TOPIC, &["vote", "voting"]]),
        answer: VOTING_AGE,
    },
    Rule {
        matcher: Matcher::AllOf(&[AGE_TOPIC, &["drive", "driving"]]),
        answer: DRIVING_AGE,
    },
    Rule {
        matcher: Matcher::AllOf(&[AGE_TOPIC, &["drink", "alcohol"]]),
        answer: DRINKING_AGE,
    },
    Rule {
        matcher: Matcher::AnyOf(&["gst", "goods and services tax"]),
        answer: GST,
    },
    Rule {
        matcher: Matcher::AnyOf(&["tenant", "landlord", "rent"]),
        answer: TENANCY,
    },
];

/// Answers a legal question from the canned topic table, or with a generic
/// disclaimer that quotes the query when no topic matches.
pub fn respond(query: &str) -> String {
    respond_with(query, &mut rand::thread_rng())
}

pub fn respond_with<R: Rng + ?Sized>(query: &str, rng: &mut R) -> String {
    if let Some(answer) = matching_answer(query) {
        return answer.to_string();
    }

    let mut fallbacks = fallback_responses(query);
    let pick = rng.gen_range(0..fallbacks.len());
    std::mem::take(&mut fallbacks[pick])
}

fn matching_answer(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&query))
        .map(|rule| rule.answer)
}

pub fn fallback_responses(query: &str) -> [String; 4] {
    [
        format!("Regarding '{query}': This is a complex legal matter that depends on specific circumstances and applicable laws. Consider consulting with a qualified legal professional for advice tailored to your situation."),
        format!("On the topic of '{query}': Legal interpretations vary based on jurisdiction and case specifics. This area of law involves multiple factors including applicable statutes, case precedents, and specific circumstances of each case."),
        format!("About '{query}': This legal question requires consideration of relevant laws, court decisions, and specific facts of your situation. For definitive guidance, consulting a legal professional is recommended."),
        format!("For your query on '{query}': The legal position involves analyzing applicable laws, regulations, and how courts have interpreted similar situations. A legal professional can provide advice specific to your circumstances."),
    ]
}

pub const CONTRACT: &str = "A contract is a legally binding agreement between two or more parties. For a contract to be valid, it needs:\n\n1. An offer from one party\n2. Acceptance of that offer by another party\n3. Consideration (something of value exchanged)\n4. Legal capacity of both parties (they must be adults of sound mind)\n5. A lawful purpose\n\nContracts can be written or verbal, though some types (like real estate) must be in writing to be enforceable.";

pub const NDA: &str = "A Non-Disclosure Agreement (NDA) is a legal contract where parties agree to keep certain information confidential. Key elements include:\n\n1. Definition of what information is considered confidential\n2. How the confidential information can be used\n3. Duration of the confidentiality obligation\n4. Consequences for breaching the agreement\n\nNDAs are commonly used in business relationships, employment, and when discussing potential partnerships.";

pub const ALIMONY: &str = "Alimony (also called spousal support) is a legal obligation where one spouse provides financial support to the other after separation or divorce. The court considers:\n\n1. Marriage duration\n2. Each spouse's age and health\n3. Income and earning capacity of each spouse\n4. Standard of living during marriage\n5. Contributions to the marriage (including as a homemaker)\n\nAlimony can be temporary or permanent, and ends if the receiving spouse remarries.";

pub const CONSUMER_RIGHTS: &str = "As a consumer in India, you have these key rights under the Consumer Protection Act, 2019:\n\n1. Right to Safety - Protection against hazardous goods and services\n2. Right to Information - Complete information about products\n3. Right to Choose - Access to a variety of goods at competitive prices\n4. Right to be Heard - Your interests receive due consideration\n5. Right to Seek Redressal - Compensation for unfair practices\n6. Right to Consumer Education - Knowledge about your rights\n\nYou can file complaints with the Consumer Disputes Redressal Commission at district, state, or national levels.";

pub const POLICE_COMPLAINT: &str = "To file a police complaint (FIR) in India, follow these steps:\n\n1. Visit the police station with jurisdiction over the area where the incident occurred\n2. Provide a detailed written statement about the incident\n3. The officer must register your FIR and give you a copy for free\n4. Get the FIR number for future reference\n5. Follow up on the investigation\n\nIf police refuse to file your FIR, you can approach the Superintendent of Police or file a complaint with the Magistrate under Section 156(3) of CrPC.";

pub const INTELLECTUAL_PROPERTY: &str = "Intellectual Property (IP) refers to creations of the mind that are protected by law. The main types are:\n\n1. Patents - Protect inventions (valid for 20 years in India)\n2. Trademarks - Protect brand names, logos, and slogans (renewable every 10 years)\n3. Copyrights - Protect creative works like books, music, and software (author's life + 60 years in India)\n4. Trade Secrets - Protect confidential business information\n\nIn India, IP rights are enforced through the courts, with specialized IP tribunals in major cities.";

pub const DIVORCE: &str = "Divorce in India varies by personal law. Under Hindu Marriage Act, grounds include:\n\n1. Adultery\n2. Cruelty (physical or mental)\n3. Desertion for at least 2 years\n4. Conversion to another religion\n5. Mental disorder\n6. Communicable disease\n7. Mutual consent (with 1-year separation)\n\nThe process typically involves filing a petition, attempts at reconciliation, evidence presentation, and final decree. Mutual consent divorces are faster (6-18 months) than contested ones (3+ years).";

pub const MARRIAGE_AGE: &str = "In India, the legal age to marry is:\n\n- For males: 21 years\n- For females: 18 years\n\nThese ages are set by the Prohibition of Child Marriage Act, 2006. Marriages below these ages are voidable (can be nullified) but not automatically void. Officials who conduct child marriages and parents who permit them can face imprisonment up to 2 years and fines up to ₹1 lakh.";

pub const WILL: &str = "A will is a legal document that specifies how your property should be distributed after death. To make a valid will in India:\n\n1. You must be 18+ years old and of sound mind\n2. It must be in writing\n3. It should be signed by you\n4. At least two witnesses must sign in your presence\n\nWills don't need to be registered or notarized, though registration provides stronger legal protection. Without a will, property is distributed according to succession laws based on religion.";

pub const RTI: &str = "The Right to Information (RTI) Act gives Indian citizens the right to request information from government bodies. Process:\n\n1. Submit application to the Public Information Officer (PIO) with ₹10 fee\n2. Information must be provided within 30 days (48 hours for life/liberty matters)\n3. If denied, you can appeal to a senior officer, then to Information Commission\n\nExemptions include national security, cabinet papers, and personal information with no public interest.";

pub const VOTING_AGE: &str = "In India, the legal age to vote is 18 years. Any citizen who has reached 18 years of age on January 1st of the election year can register as a voter. This is established by the 61st Amendment of the Constitution of India, which lowered the voting age from 21 to 18 in 1989.";

pub const DRIVING_AGE: &str = "In India, the legal age to obtain a driving license is:\n\n- 16 years: For motorcycles below 50cc\n- 18 years: For cars and motorcycles above 50cc\n- 20 years: For commercial vehicles\n\nBefore getting a full license, you must obtain a learner's license and practice for at least 30 days.";

pub const DRINKING_AGE: &str = "In India, the legal drinking age varies by state:\n\n- 18 years: Himachal Pradesh, Sikkim, Puducherry\n- 21 years: Telangana, Maharashtra, Arunachal Pradesh\n- 25 years: Delhi, Haryana, Punjab\n\nSome states like Gujarat, Bihar, Nagaland, and Mizoram prohibit alcohol completely.";

pub const GST: &str = "Goods and Services Tax (GST) in India is a comprehensive indirect tax on manufacture, sale, and consumption of goods and services. Key facts:\n\n1. Implemented on July 1, 2017\n2. Replaced multiple taxes like VAT, Service Tax, Excise Duty\n3. Main rates: 0%, 5%, 12%, 18%, and 28%\n4. Businesses with turnover above ₹40 lakhs must register (₹20 lakhs in some states)\n5. Returns are filed monthly or quarterly\n\nThe GST Council decides rates and policies, and the system operates through GSTN portal.";

pub const TENANCY: &str = "Tenancy laws in India vary by state, but generally:\n\n1. Rental agreements should be in writing and registered\n2. Security deposits are typically 2-3 months' rent (up to 10 months in Bangalore)\n3. Notice period for vacating is usually 1-3 months\n4. Landlords must maintain essential services and structural repairs\n5. Tenants must pay rent on time and maintain the property\n\nThe Model Tenancy Act, 2021 aims to standardize these laws but states need to adopt it.";

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contract_keyword_is_case_insensitive() {
        assert_eq!(respond("What is a CONTRACT?"), CONTRACT);
        assert_eq!(respond("contract"), CONTRACT);
    }

    #[test]
    fn contract_wins_over_later_topics() {
        // "will" and "rent" also occur, but "contract" comes first
        assert_eq!(respond("Will a rent contract hold up?"), CONTRACT);
    }

    #[test]
    fn nda_question() {
        assert_eq!(respond("What is an NDA?"), NDA);
    }

    #[test]
    fn sample_questions_hit_their_topics() {
        assert_eq!(respond("What are my rights as a consumer?"), CONSUMER_RIGHTS);
        assert_eq!(respond("What is the legal age to marry?"), MARRIAGE_AGE);
        assert_eq!(respond("How do I file a police complaint?"), POLICE_COMPLAINT);
        assert_eq!(respond("What is alimony?"), ALIMONY);
        assert_eq!(respond("What is intellectual property law?"), INTELLECTUAL_PROPERTY);
        assert_eq!(respond("What is RTI?"), RTI);
        assert_eq!(respond("Grounds for divorce"), DIVORCE);
        assert_eq!(respond("How do I write a will"), WILL);
    }

    #[test]
    fn compound_age_rules() {
        assert_eq!(respond("legal age to drive"), DRIVING_AGE);
        assert_eq!(respond("What is the legal age for voting?"), VOTING_AGE);
        assert_eq!(respond("Minimum age to vote"), VOTING_AGE);
        assert_eq!(respond("legal age for alcohol"), DRINKING_AGE);
    }

    #[test]
    fn age_subject_alone_does_not_match() {
        let reply = respond_with("can I drive a truck", &mut StdRng::seed_from_u64(1));
        assert!(fallback_responses("can I drive a truck").contains(&reply));
    }

    #[test]
    fn keyword_groups() {
        assert_eq!(respond("How does GST work?"), GST);
        assert_eq!(respond("goods and services tax slabs"), GST);
        assert_eq!(respond("my landlord kept my deposit"), TENANCY);
        assert_eq!(respond("tenant eviction"), TENANCY);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "parties" contains "rti"
        assert_eq!(respond("Are both parties bound?"), RTI);
    }

    #[test]
    fn unmatched_query_is_echoed_in_a_fallback() {
        let query = "Is jaywalking a CRIME?";
        let known = fallback_responses(query);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..32 {
            let reply = respond_with(query, &mut rng);
            assert!(known.contains(&reply));
            assert!(reply.contains(query));
        }
    }

    #[test]
    fn every_fallback_is_reachable() {
        let query = "Is jaywalking a crime?";
        let known = fallback_responses(query);
        let mut rng = StdRng::seed_from_u64(3);

        let mut seen = [false; 4];
        for _ in 0..200 {
            let reply = respond_with(query, &mut rng);
            let i = known.iter().position(|k| *k == reply).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
