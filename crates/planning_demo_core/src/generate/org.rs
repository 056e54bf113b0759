//! Organization, departments, users and team membership.

use super::fake::Faker;
use super::rng::DemoRng;
use super::{generated_at, row_id, GenerateResult};
use crate::config::GeneratorConfig;
use crate::model::org::{Department, Organization, Specialization, Team, TeamMember, User};
use crate::repo::planning_repo::PlanningWriter;
use std::collections::HashSet;

pub fn generate_organizations<W: PlanningWriter>(
    config: &GeneratorConfig,
    writer: &W,
) -> GenerateResult<Organization> {
    let organization = Organization {
        id: row_id(0),
        name: config.organization_name.clone(),
        created_at: generated_at(config),
    };
    writer.insert_organization(&organization)?;
    Ok(organization)
}

/// One department per configured entry, in config order.
pub fn generate_departments<W: PlanningWriter>(
    config: &GeneratorConfig,
    writer: &W,
    organization: &Organization,
) -> GenerateResult<Vec<Department>> {
    let mut departments = Vec::with_capacity(config.departments.len());
    for (index, spec) in config.departments.iter().enumerate() {
        let department = Department {
            id: row_id(index),
            organization_id: organization.id,
            name: spec.name.clone(),
            kind: spec.kind,
        };
        writer.insert_department(&department)?;
        departments.push(department);
    }
    Ok(departments)
}

/// Users role by role, filling department quotas in department order.
///
/// `departments` must line up with `config.departments`.
pub fn generate_users<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    organization: &Organization,
    departments: &[Department],
) -> GenerateResult<Vec<User>> {
    let mut quotas = department_quotas(config);
    let mut emails = HashSet::new();
    let mut users = Vec::with_capacity(config.user_total as usize);

    for role in &config.roles {
        for _ in 0..role.count {
            let slot = match quotas.iter().position(|remaining| *remaining > 0) {
                Some(slot) => {
                    quotas[slot] -= 1;
                    slot
                }
                None => rng.int(0..=(departments.len().saturating_sub(1) as u32)) as usize,
            };
            let department = departments
                .get(slot)
                .ok_or(super::GenerateError::EmptyPool("departments"))?;
            let specializations = config
                .departments
                .get(slot)
                .map(|spec| spec.specializations.as_slice())
                .unwrap_or_default();

            let timezone = rng.weighted(&config.timezones, "timezones")?;
            let full_name = Faker::new(rng).name()?;
            let email = unique_email(&full_name, &config.email_domain, &mut emails);
            let specialization = if specializations.is_empty() {
                Specialization::Business
            } else {
                *rng.pick(specializations, "specializations")?
            };

            let user = User {
                id: row_id(users.len()),
                organization_id: organization.id,
                department_id: department.id,
                email,
                full_name,
                role: role.role,
                specialization,
                availability_hours_per_week: role.availability_hours,
                timezone,
                created_at: generated_at(config),
                index: users.len(),
            };
            writer.insert_user(&user)?;
            users.push(user);
        }
    }
    Ok(users)
}

/// Teams per department; the lead is a random lead, manager or senior of
/// the department, else its first user.
pub fn generate_teams<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    departments: &[Department],
    users: &[User],
) -> GenerateResult<Vec<Team>> {
    let mut teams = Vec::new();
    for (department, spec) in departments.iter().zip(&config.departments) {
        let members: Vec<&User> = users
            .iter()
            .filter(|user| user.department_id == department.id)
            .collect();
        let lead_candidates: Vec<&User> = members
            .iter()
            .copied()
            .filter(|user| user.role.can_lead_team())
            .collect();

        for name in spec.team_names.iter().take(spec.team_count) {
            let lead_user_id = if lead_candidates.is_empty() {
                members.first().map(|user| user.id)
            } else {
                Some(rng.pick(&lead_candidates, "team leads")?.id)
            };
            let team = Team {
                id: row_id(teams.len()),
                department_id: department.id,
                name: name.clone(),
                lead_user_id,
            };
            writer.insert_team(&team)?;
            teams.push(team);
        }
    }
    Ok(teams)
}

/// Team allocations. Overload-pattern users split `factor * 100` percent
/// over several teams; everyone else sits in one team at 100 percent.
pub fn generate_team_members<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    teams: &[Team],
    users: &[User],
) -> GenerateResult<Vec<TeamMember>> {
    let mut members = Vec::new();
    for user in users {
        let department_teams: Vec<&Team> = teams
            .iter()
            .filter(|team| team.department_id == user.department_id)
            .collect();
        if department_teams.is_empty() {
            continue;
        }

        let factor = config
            .overload_patterns
            .iter()
            .find(|pattern| pattern.user_indices.contains(&user.index))
            .map_or(1.0, |pattern| pattern.factor);

        let assignments: Vec<(&Team, u32)> = if factor > 1.0 {
            let wanted = ((factor * 2.0) as usize).min(department_teams.len());
            let allocation = (100.0 / wanted as f64 * factor) as u32;
            rng.sample(&department_teams, wanted)
                .into_iter()
                .map(|team| (*team, allocation))
                .collect()
        } else {
            vec![(*rng.pick(&department_teams, "department teams")?, 100)]
        };

        for (team, allocation_percentage) in assignments {
            let member = TeamMember {
                team_id: team.id,
                user_id: user.id,
                allocation_percentage,
            };
            writer.insert_team_member(&member)?;
            members.push(member);
        }
    }
    Ok(members)
}

/// floor(total * weight) per department, remainder to the first one.
fn department_quotas(config: &GeneratorConfig) -> Vec<u32> {
    let total = config.user_total;
    let mut quotas: Vec<u32> = config
        .departments
        .iter()
        .map(|spec| (f64::from(total) * spec.weight) as u32)
        .collect();
    let assigned: u32 = quotas.iter().sum();
    if let Some(first) = quotas.first_mut() {
        *first += total.saturating_sub(assigned);
    }
    quotas
}

/// `first.last@domain`, lower-cased, with a numeric suffix on collision.
fn unique_email(full_name: &str, domain: &str, taken: &mut HashSet<String>) -> String {
    let local = full_name.to_lowercase().replace(' ', ".");
    let mut candidate = format!("{local}@{domain}");
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = format!("{local}{suffix}@{domain}");
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::{department_quotas, unique_email};
    use crate::config::GeneratorConfig;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn quotas_give_rounding_remainder_to_first_department() {
        let config =
            GeneratorConfig::with_reference_date(1, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let quotas = department_quotas(&config);
        assert_eq!(quotas, vec![62, 22, 22, 15, 15, 7, 7]);
        assert_eq!(quotas.iter().sum::<u32>(), config.user_total);
    }

    #[test]
    fn colliding_emails_get_numeric_suffix() {
        let mut taken = HashSet::new();
        assert_eq!(
            unique_email("Sarah Chen", "techvision.com", &mut taken),
            "sarah.chen@techvision.com"
        );
        assert_eq!(
            unique_email("Sarah Chen", "techvision.com", &mut taken),
            "sarah.chen2@techvision.com"
        );
        assert_eq!(
            unique_email("Sarah Chen", "techvision.com", &mut taken),
            "sarah.chen3@techvision.com"
        );
    }
}
