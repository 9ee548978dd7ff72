pub mod member;
pub mod team;

/*
 Members can exist without a team. A team never owns its members:
 removing a team only clears member.team_id.
 Audit columns on member are written by the repository save path,
 there is no ActiveModelBehavior hook for them.
 */
