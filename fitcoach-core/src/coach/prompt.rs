//! Prompt construction for the coach and nutritionist personas

use super::profile::{or_default, ChatContext, FitnessLevel, FoodQuery, NutritionProfile, UserProfile};

pub const COACH_NAME: &str = "FitCoach AI";
pub const NUTRITIONIST_NAME: &str = "NutriCoach AI";

pub fn workout_plan(profile: &UserProfile) -> String {
    format!(
        "You are a professional fitness coach. Create a personalized training plan for this user.\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Fitness level: {level}\n\
         - Goals: {goals}\n\
         - Available time per week: {hours} hours\n\
         - Equipment: {equipment}\n\
         - Injuries: {injuries}\n\
         - Preferences: {preferences}\n\
         \n\
         The plan must cover:\n\
         1. Training frequency and session length\n\
         2. Exercises with sets and reps\n\
         3. Intensity guidance\n\
         4. Rest periods\n\
         5. Progression adjustments\n\
         6. Nutrition tips that support the plan\n\
         7. Safety notes\n\
         \n\
         Reply with a JSON object containing plan_name, duration_weeks, weekly_schedule, \
         exercises, nutrition_tips and safety_notes.",
        age = or_default(&profile.age, "unknown"),
        gender = or_default(&profile.gender, "unknown"),
        height = or_default(&profile.height_cm, "unknown"),
        weight = or_default(&profile.weight_kg, "unknown"),
        level = profile.fitness_level,
        goals = or_default(&profile.goals, "general fitness"),
        hours = or_default(&profile.available_hours_per_week, "unknown"),
        equipment = or_default(&profile.equipment, "basic equipment"),
        injuries = or_default(&profile.injuries, "none"),
        preferences = or_default(&profile.preferences, "no particular preference"),
    )
}

pub fn exercise_guidance(exercise: &str, level: FitnessLevel) -> String {
    format!(
        "Give a {level}-level trainee detailed guidance on the exercise \"{exercise}\", covering:\n\
         \n\
         1. Key technique points\n\
         2. Common mistakes and how to correct them\n\
         3. Breathing\n\
         4. Suitable load or intensity\n\
         5. Safety precautions\n\
         6. Alternative exercises, if any\n\
         \n\
         Use professional but plain language and keep the advice practical."
    )
}

pub fn progress_analysis(workout_data: &serde_json::Value) -> String {
    let data = serde_json::to_string_pretty(workout_data).unwrap_or_else(|_| workout_data.to_string());
    format!(
        "You are a professional fitness coach. Analyze the following training data and give advice.\n\
         \n\
         Training data:\n\
         {data}\n\
         \n\
         Assess:\n\
         1. Whether intensity and frequency are appropriate\n\
         2. The progress trend\n\
         3. What needs improvement\n\
         4. Next training steps\n\
         5. How close the user is to their goals\n\
         \n\
         Give concrete, actionable recommendations."
    )
}

pub fn coach_system(context: &ChatContext) -> String {
    format!(
        "You are a professional, enthusiastic and patient AI fitness coach named \"{COACH_NAME}\".\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Fitness level: {level}\n\
         - Goals: {goals}\n\
         \n\
         Give scientific, accurate and personalized advice, encourage the user, explain the \
         reasoning behind each recommendation and always put safety first. For medical \
         questions, recommend consulting a doctor.",
        age = or_default(&context.age, "unknown"),
        gender = or_default(&context.gender, "unknown"),
        level = context.fitness_level.unwrap_or_default(),
        goals = or_default(&context.goals, "general fitness"),
    )
}

pub fn meal_plan(profile: &NutritionProfile) -> String {
    let target = profile.target_weight_kg.or(profile.weight_kg);
    format!(
        "You are a professional nutritionist. Create a personalized one-week meal plan for this user.\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Current weight: {weight} kg\n\
         - Target weight: {target} kg\n\
         - Activity level: {activity}\n\
         - Dietary restrictions: {restrictions}\n\
         - Health goals: {goals}\n\
         - Allergies: {allergies}\n\
         - Preferences: {preferences}\n\
         \n\
         Include daily meals and snacks, portions, cooking methods, macro distribution, a \
         shopping list, recipes and notes.\n\
         \n\
         Reply with a JSON object containing daily_meals, shopping_list, recipes, \
         nutrition_summary and tips.",
        age = or_default(&profile.age, "unknown"),
        gender = or_default(&profile.gender, "unknown"),
        height = or_default(&profile.height_cm, "unknown"),
        weight = or_default(&profile.weight_kg, "unknown"),
        target = or_default(&target, "unknown"),
        activity = or_default(&profile.activity_level, "moderate"),
        restrictions = or_default(&profile.dietary_restrictions, "none"),
        goals = or_default(&profile.health_goals, "stay healthy"),
        allergies = or_default(&profile.allergies, "none"),
        preferences = or_default(&profile.preferences, "no particular preference"),
    )
}

pub fn food_analysis(query: &FoodQuery) -> String {
    let ingredients = query
        .ingredients
        .as_ref()
        .map(|i| format!("Ingredients: {}\n", i))
        .unwrap_or_default();
    format!(
        "Analyze the nutritional content of this food.\n\
         \n\
         Food: {name}\n\
         Portion: {portion}\n\
         {ingredients}\
         \n\
         Cover calories, protein, carbohydrates and fat, vitamins and minerals, a health \
         assessment, who it suits and how to eat it.\n\
         \n\
         Reply with a JSON object containing calories, protein, carbs, fat, vitamins, minerals, \
         health_score and recommendations.",
        name = query.food_name,
        portion = query.portion_size,
    )
}

pub fn dietary_advice(condition: &str, profile: &NutritionProfile) -> String {
    format!(
        "Give professional dietary advice for a user with {condition}.\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Current weight: {weight} kg\n\
         - Activity level: {activity}\n\
         \n\
         Cover dietary principles, recommended foods, foods to avoid, macro ratios, meal timing \
         and supplements where needed. Keep the advice practical.",
        age = or_default(&profile.age, "unknown"),
        gender = or_default(&profile.gender, "unknown"),
        weight = or_default(&profile.weight_kg, "unknown"),
        activity = or_default(&profile.activity_level, "moderate"),
    )
}

pub fn macros(profile: &NutritionProfile) -> String {
    let target = profile.target_weight_kg.or(profile.weight_kg);
    format!(
        "Calculate daily macronutrient needs for this user using the Mifflin-St Jeor equation.\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Target weight: {target} kg\n\
         - Activity level: {activity}\n\
         - Health goals: {goals}\n\
         \n\
         Reply with a JSON object containing bmr, tdee, calories, protein, carbs, fat and \
         explanation.",
        age = or_default(&profile.age, "unknown"),
        gender = or_default(&profile.gender, "unknown"),
        height = or_default(&profile.height_cm, "unknown"),
        weight = or_default(&profile.weight_kg, "unknown"),
        target = or_default(&target, "unknown"),
        activity = or_default(&profile.activity_level, "moderate"),
        goals = or_default(&profile.health_goals, "stay healthy"),
    )
}

pub fn nutritionist_system(context: &ChatContext) -> String {
    format!(
        "You are a professional, careful and responsible AI nutritionist named \"{NUTRITIONIST_NAME}\".\n\
         \n\
         User information:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Health goals: {goals}\n\
         - Dietary restrictions: {restrictions}\n\
         \n\
         Give scientific, safe and personalized nutrition advice. Never recommend extreme or \
         unhealthy diets. For serious health issues, recommend consulting a doctor.",
        age = or_default(&context.age, "unknown"),
        gender = or_default(&context.gender, "unknown"),
        goals = or_default(&context.health_goals, "stay healthy"),
        restrictions = or_default(&context.dietary_restrictions, "none"),
    )
}
