mod configured_agents;
mod relay_round;
