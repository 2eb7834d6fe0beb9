//! Sample catalog loaded at startup.

use crate::models::{Category, Service};

fn service(
    id: i64,
    title: &str,
    description: &str,
    details: &[&str],
    price: &str,
    popular: bool,
) -> Service {
    Service {
        id,
        title: title.to_string(),
        description: description.to_string(),
        details: details.iter().map(|d| d.to_string()).collect(),
        price: price.to_string(),
        popular,
    }
}

/// The practice's standard offerings, grouped by category in display order.
pub fn sample_catalog() -> Vec<(Category, Vec<Service>)> {
    vec![
        (
            Category::Litigation,
            vec![
                service(
                    1,
                    "Civil Litigation",
                    "Representation in court for civil disputes.",
                    &[
                        "Initial case assessment",
                        "Filing of pleadings and motions",
                        "Discovery process",
                        "Trial representation",
                        "Appeals process assistance",
                    ],
                    "$250-500/hour",
                    true,
                ),
                service(
                    2,
                    "Personal Injury",
                    "Legal representation for injury claims.",
                    &[
                        "Case evaluation",
                        "Documentation of injuries",
                        "Negotiation with insurance companies",
                        "Litigation if necessary",
                        "Contingency fee basis available",
                    ],
                    "Contingency fee (30-40%)",
                    false,
                ),
                service(
                    3,
                    "Labor & Employment",
                    "Representation in employment disputes.",
                    &[
                        "Wrongful termination",
                        "Workplace discrimination",
                        "Wage and hour violations",
                        "Employment contract disputes",
                        "Harassment claims",
                    ],
                    "$225-400/hour",
                    false,
                ),
            ],
        ),
        (
            Category::Family,
            vec![
                service(
                    4,
                    "Divorce Proceedings",
                    "Legal representation during divorce.",
                    &[
                        "Filing for divorce",
                        "Asset division negotiation",
                        "Child custody arrangements",
                        "Alimony and child support calculation",
                        "Mediation services",
                    ],
                    "$250-400/hour",
                    true,
                ),
                service(
                    5,
                    "Child Custody",
                    "Representation in custody disputes.",
                    &[
                        "Initial custody evaluation",
                        "Parenting plan development",
                        "Court representation",
                        "Modification of existing orders",
                        "Mediation assistance",
                    ],
                    "$250-450/hour",
                    false,
                ),
                service(
                    6,
                    "Adoption",
                    "Legal assistance with adoption process.",
                    &[
                        "Eligibility assessment",
                        "Document preparation",
                        "Agency coordination",
                        "Court representation",
                        "Post-adoption legal matters",
                    ],
                    "$3,000-6,000 (flat fee)",
                    false,
                ),
            ],
        ),
        (
            Category::Business,
            vec![
                service(
                    7,
                    "Business Formation",
                    "Legal assistance for new businesses.",
                    &[
                        "Entity selection guidance",
                        "Filing formation documents",
                        "Operating agreements/bylaws",
                        "Compliance guidance",
                        "Initial contracts preparation",
                    ],
                    "$1,500-3,000 (flat fee)",
                    true,
                ),
                service(
                    8,
                    "Contract Review",
                    "Legal review of business contracts.",
                    &[
                        "Comprehensive contract review",
                        "Risk identification",
                        "Negotiation assistance",
                        "Contract drafting",
                        "Contract dispute resolution",
                    ],
                    "$200-350/hour",
                    false,
                ),
                service(
                    9,
                    "Mergers & Acquisitions",
                    "Legal guidance for M&A transactions.",
                    &[
                        "Due diligence review",
                        "Transaction structuring",
                        "Document preparation",
                        "Negotiation assistance",
                        "Regulatory compliance",
                    ],
                    "$300-600/hour",
                    false,
                ),
            ],
        ),
        (
            Category::Estate,
            vec![
                service(
                    10,
                    "Will Preparation",
                    "Drafting and preparation of wills.",
                    &[
                        "Initial consultation",
                        "Asset review",
                        "Will drafting",
                        "Witness execution",
                        "Periodic will review",
                    ],
                    "$800-1,500 (flat fee)",
                    true,
                ),
                service(
                    11,
                    "Estate Planning",
                    "Comprehensive estate planning services.",
                    &[
                        "Will preparation",
                        "Trust establishment",
                        "Power of attorney",
                        "Healthcare directives",
                        "Estate tax planning",
                    ],
                    "$2,500-5,000 (flat fee)",
                    false,
                ),
                service(
                    12,
                    "Probate Administration",
                    "Assistance with the probate process.",
                    &[
                        "Filing of probate documents",
                        "Inventory of assets",
                        "Debt and tax payment",
                        "Asset distribution",
                        "Court representation",
                    ],
                    "$250-400/hour",
                    false,
                ),
            ],
        ),
    ]
}
